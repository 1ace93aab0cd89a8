use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod generator;
pub mod payslip;

pub use crate::config::AppState;

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok(); // Load .env file

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::payslip::handlers::generate_payslip,
            crate::payslip::handlers::bulk_generate,
            crate::payslip::handlers::bulk_generate_csv,
        ),
        components(
            schemas(
                payslip::models::RawRecord,
                payslip::models::LineItem,
                payslip::models::BulkGenerateRequest,
            )
        ),
        tags(
            (name = "Payslip Service", description = "Payslip rendering endpoints.")
        )
    )]
    struct ApiDoc;

    let app_state = web::Data::new(AppState::from_env());

    let prometheus = PrometheusMetricsBuilder::new("payslip_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/generate-pdf")
                            .route(web::post().to(payslip::handlers::generate_payslip)),
                    )
                    .service(
                        web::resource("/bulk-generate")
                            .route(web::post().to(payslip::handlers::bulk_generate)),
                    )
                    .service(
                        web::resource("/bulk-generate-csv")
                            .route(web::post().to(payslip::handlers::bulk_generate_csv)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
