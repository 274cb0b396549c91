use minecraft_log_hook::error::HookError;

#[tokio::main]
async fn main() -> Result<(), HookError> {
    minecraft_log_hook::app::run().await
}
