use reparse::runtime::{boot, serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let config_path = std::env::args().nth(1);
    let engine = boot::boot(config_path.as_deref())?;
    serve::serve(engine).await
}
