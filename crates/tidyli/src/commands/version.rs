pub fn run() -> anyhow::Result<()> {
    println!("tidyli {}", env!("CARGO_PKG_VERSION"));
    println!("Review LinkedIn connections and keep a decision log");
    Ok(())
}
