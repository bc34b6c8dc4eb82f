use crate::Config;
use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, backend: Option<String>) -> Result<()> {
    std::fs::create_dir_all(&path)?;

    let target = path.join("fightcard.toml");
    if target.exists() {
        anyhow::bail!("{} already exists", target.display());
    }

    let mut config = Config::default();
    if let Some(base_url) = backend {
        config.backend.base_url = base_url;
    }
    config.validate()?;

    std::fs::write(&target, config.to_toml()?)?;

    tracing::info!("Created {}", target.display());
    tracing::info!("Run 'fightcard check' to probe the backend");
    tracing::info!("Run 'fightcard serve' to start the viewer");

    Ok(())
}
