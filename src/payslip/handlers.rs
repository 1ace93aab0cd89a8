use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use log::{error, info};

use crate::config::{AppState, PayslipDefaults};
use crate::generator::{generate_payslip_pdf, ArchiveBuilder, GeneratorError, RenderSession};
use crate::payslip::extract::extract_line_items;
use crate::payslip::models::{parse_csv_records, BulkGenerateRequest, RawRecord};
use crate::payslip::normalize::normalize;

const ARCHIVE_FILENAME: &str = "payslips.zip";

#[utoipa::path(
    context_path = "/api",
    tag = "Payslip Service",
    post,
    path = "/generate-pdf",
    request_body = RawRecord,
    responses(
        (status = 200, description = "Rendered payslip PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 500, description = "Rendering failed")
    )
)]
pub async fn generate_payslip(
    state: web::Data<AppState>,
    body: web::Json<RawRecord>,
) -> impl Responder {
    let raw = body.into_inner();
    let defaults = state.defaults.clone();
    let logo = state.logo.clone();

    let result = web::block(move || {
        let items = extract_line_items(&raw);
        let record = normalize(&raw, items, &defaults);
        let session = RenderSession::open()?;
        generate_payslip_pdf(&session, &record, logo.as_deref())
    })
    .await;

    match result {
        Ok(Ok(document)) => {
            info!("Rendered payslip {}", document.filename);
            pdf_response(document.filename, document.pdf)
        }
        Ok(Err(err)) => rendering_failure(err),
        Err(err) => worker_failure(err),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Payslip Service",
    post,
    path = "/bulk-generate",
    request_body = BulkGenerateRequest,
    responses(
        (status = 200, description = "Zip archive with one payslip PDF per record", body = Vec<u8>, content_type = "application/zip"),
        (status = 400, description = "records is missing, not an array, or empty"),
        (status = 500, description = "Rendering failed; the whole batch is aborted")
    )
)]
pub async fn bulk_generate(
    state: web::Data<AppState>,
    body: web::Json<BulkGenerateRequest>,
) -> impl Responder {
    let records = body.into_inner().records;
    bulk_response(&state, records).await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Payslip Service",
    post,
    path = "/bulk-generate-csv",
    request_body(content = inline(CsvUploadRequest), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Zip archive with one payslip PDF per CSV row", body = Vec<u8>, content_type = "application/zip"),
        (status = 400, description = "Missing, malformed, or empty CSV file"),
        (status = 500, description = "Rendering failed; the whole batch is aborted")
    )
)]
pub async fn bulk_generate_csv(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> impl Responder {
    let mut csv_data: Option<Vec<u8>> = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
        };

        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if field_name != "file" {
            continue;
        }

        let mut bytes = Vec::new();
        loop {
            match field.try_next().await {
                Ok(Some(chunk)) => bytes.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
            }
        }
        csv_data = Some(bytes);
        break;
    }

    let Some(csv_data) = csv_data else {
        return HttpResponse::BadRequest().body("No file was uploaded");
    };

    let records = match parse_csv_records(&csv_data) {
        Ok(records) => records,
        Err(err) => {
            return HttpResponse::BadRequest().body(format!("Failed to parse CSV: {}", err))
        }
    };
    if records.is_empty() {
        return HttpResponse::BadRequest().body("CSV is empty.");
    }

    bulk_response(&state, records).await
}

/// Multipart shape of the CSV upload endpoint, for the API docs only.
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct CsvUploadRequest {
    /// CSV table with a header row; one payslip per data row.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Shared batch tail: validate, render every row against one session,
/// return the archive.
async fn bulk_response(state: &web::Data<AppState>, records: Vec<RawRecord>) -> HttpResponse {
    if records.is_empty() {
        return HttpResponse::BadRequest().body("records must be a non-empty array");
    }

    let defaults = state.defaults.clone();
    let logo = state.logo.clone();
    let count = records.len();

    let result = web::block(move || render_batch(&records, &defaults, logo.as_deref())).await;

    match result {
        Ok(Ok(archive)) => {
            info!("Rendered batch of {} payslips", count);
            HttpResponse::Ok()
                .content_type("application/zip")
                .insert_header(attachment(ARCHIVE_FILENAME.to_string()))
                .body(archive)
        }
        Ok(Err(err)) => rendering_failure(err),
        Err(err) => worker_failure(err),
    }
}

/// Render rows strictly in input order against one shared session. The
/// first failure aborts the whole batch; the session's working directory
/// is released when it drops, on either path.
fn render_batch(
    records: &[RawRecord],
    defaults: &PayslipDefaults,
    logo: Option<&str>,
) -> Result<Vec<u8>, GeneratorError> {
    let session = RenderSession::open()?;
    let mut archive = ArchiveBuilder::new();

    for raw in records {
        let items = extract_line_items(raw);
        let record = normalize(raw, items, defaults);
        let document = generate_payslip_pdf(&session, &record, logo)?;
        archive.add_file(&document.filename, &document.pdf)?;
    }

    archive.finish()
}

fn pdf_response(filename: String, pdf: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(attachment(filename))
        .body(pdf)
}

fn attachment(filename: String) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }
}

fn rendering_failure(err: GeneratorError) -> HttpResponse {
    error!("Failed to render payslip: {}", err);
    HttpResponse::InternalServerError().body(err.to_string())
}

fn worker_failure(err: actix_web::error::BlockingError) -> HttpResponse {
    error!("Rendering worker failed: {}", err);
    HttpResponse::InternalServerError().body(err.to_string())
}
