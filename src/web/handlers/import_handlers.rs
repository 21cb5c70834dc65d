// src/web/handlers/import_handlers.rs
use crate::import::{parse_students_str, ImportReport};
use crate::web::types::{
    DataResponse, ImportRequest, StandardErrorResponse, StandardRequest, WithConversationId,
};

use rocket::serde::json::Json;
use tracing::{error, info};

pub async fn import_students_handler(
    request: Json<StandardRequest<ImportRequest>>,
) -> Result<Json<DataResponse<ImportReport>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    match parse_students_str(&request.data.csv, request.data.university.as_deref()) {
        Ok(report) => {
            info!(
                "Student import batch {}: {} imported, {} rejected",
                report.batch_id,
                report.imported_count(),
                report.error_count()
            );

            let message = format!(
                "{} students imported, {} rows rejected",
                report.imported_count(),
                report.error_count()
            );
            Ok(Json(DataResponse::success(message, report, conversation_id)))
        }
        Err(e) => {
            error!("Student import failed: {:#}", e);
            Err(Json(StandardErrorResponse::new(
                format!("Could not read student CSV: {}", e),
                "IMPORT_ERROR".to_string(),
                vec![
                    "Include a header row with first_name, last_name and email".to_string(),
                    "Use commas as separators".to_string(),
                ],
                conversation_id,
            )))
        }
    }
}
