#[tokio::main]
async fn main() -> anyhow::Result<()> {
    phoneframe_lib::run().await
}
