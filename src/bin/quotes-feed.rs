#[path = "quotes_feed/types.rs"]
mod types;
#[path = "quotes_feed/http_error.rs"]
mod http_error;
#[path = "quotes_feed/handlers.rs"]
mod handlers;
#[path = "quotes_feed/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
