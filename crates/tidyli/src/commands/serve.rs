use tidyli_server::AppState;

use super::Context;

pub fn run(ctx: &Context, port: Option<u16>, bind: Option<&str>) -> anyhow::Result<()> {
    let mut config = ctx.config.clone();
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind = bind.to_string();
    }

    let state = AppState::new(&config.data_dir);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(tidyli_server::serve(state, &config.listen_addr()))?;
    Ok(())
}
