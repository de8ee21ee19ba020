#[tokio::main]
async fn main() {
    if let Err(e) = verifycore::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
