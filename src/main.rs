#[actix_web::main]
async fn main() -> std::io::Result<()> {
    payslip_server::run().await
}
