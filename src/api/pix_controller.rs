use crate::models::requests::PixChargeRequest;
use crate::models::responses::{ApiResponse, PixPayloadResponse};
use crate::services::pix;
use actix_web::{web, HttpResponse, Result as ActixResult};
use log::{error, info};

pub async fn generate(request: web::Json<PixChargeRequest>) -> ActixResult<HttpResponse> {
    info!("Received payload generation request");

    let request = request.into_inner();
    let transaction_id = request
        .transaction_id
        .clone()
        .unwrap_or_else(|| "***".to_string());

    match pix::generate_payload(&request) {
        Ok(payload) => {
            info!("Generated payload for transaction {}", transaction_id);
            Ok(HttpResponse::Ok().json(ApiResponse {
                success: true,
                data: Some(PixPayloadResponse {
                    payload,
                    transaction_id,
                }),
                error: None,
            }))
        }
        Err(e) => {
            error!("Error generating payload: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()> {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn generate_returns_a_payload_with_a_trailing_checksum() {
        let app = test::init_service(
            App::new().route("/api/pix/payload", web::post().to(generate)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/pix/payload")
            .set_json(json!({
                "pixKey": "teste@pix.com",
                "merchantName": "Loja Teste",
                "merchantCity": "Sao Paulo",
                "amount": 10.0
            }))
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["success"], true);

        let payload = body["data"]["payload"].as_str().unwrap();
        assert!(payload.starts_with("000201"));
        assert!(payload[payload.len() - 8..].starts_with("6304"));
        assert_eq!(body["data"]["transactionId"], "***");
    }

    #[actix_web::test]
    async fn oversized_key_is_rejected_with_a_bad_request() {
        let app = test::init_service(
            App::new().route("/api/pix/payload", web::post().to(generate)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/pix/payload")
            .set_json(json!({
                "pixKey": format!("{}@pix.com", "a".repeat(100)),
                "merchantName": "Loja Teste",
                "merchantCity": "Sao Paulo",
                "amount": 10.0
            }))
            .to_request();

        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
