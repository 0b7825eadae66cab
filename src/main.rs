use anyhow::Result;
use crowd_rounds::utils::logging;
use crowd_rounds::{Action, App, AppError, Config};
use std::path::Path;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：优先使用 CROWD_CONFIG 指定的 TOML 文件
    let config = match std::env::var("CROWD_CONFIG") {
        Ok(path) => Config::from_toml_file(Path::new(&path))?,
        Err(_) => Config::from_env(),
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 第一个参数为动作，默认 parse
    let action: Action = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Action::Parse,
    };

    // 初始化并运行应用；配置错误在写出任何文件之前终止
    let mut app = match App::initialize(config, action).await {
        Ok(app) => app,
        Err(e) => {
            if e.downcast_ref::<AppError>().is_some_and(AppError::is_config) {
                error!("❌ 配置错误, 未写出任何文件: {}", e);
            }
            return Err(e);
        }
    };
    app.run(action).await?;

    Ok(())
}
