use std::process::ExitCode;

use chrono::Local;
use imgweight::{error_time, info_time, process::run, AuditConfig, Error};

#[tokio::main]
async fn main() -> ExitCode {
    let start_time = Local::now();
    let config = AuditConfig::default();
    let output = config.output.display();

    match run(&config).await {
        Ok(_) => {
            info_time!(
                start_time,
                "Análisis finalizado. Los resultados se han guardado en {}",
                output
            );
            ExitCode::SUCCESS
        }
        Err(Error::OutputLocked { .. }) => {
            error_time!(
                "Error: El archivo {} está en uso. Por favor ciérrelo y vuelva a intentarlo.",
                output
            );
            ExitCode::FAILURE
        }
        Err(Error::OutputExists { .. }) => {
            error_time!(
                "Error: El archivo {} ya existe. Muévalo o bórrelo antes de volver a ejecutar el análisis.",
                output
            );
            ExitCode::FAILURE
        }
        Err(Error::Xlsx(e)) => {
            error_time!(
                "Error: No se pudo escribir el archivo {} porque está en uso o no se tienen permisos. ({})",
                output,
                e
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error_time!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
