use crate::services::slug::slugify;
use anyhow::Result;

pub fn run(names: &[String]) -> Result<()> {
    let mut failed = 0;
    for name in names {
        match slugify(name) {
            Ok(slug) => println!("{}\t{}", name, slug),
            Err(e) => {
                eprintln!("{:?}: {}", name, e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{} name(s) could not be slugified", failed);
    }
    Ok(())
}
