use std::fs;
use std::path::Path;

use super::{Context, plural};

pub fn import(ctx: &Context, file: &Path) -> Result<(), String> {
    let raw = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let owner = ctx.owner()?;
    let (c, count) = ctx
        .store()?
        .import(&owner, &raw)
        .map_err(|e| e.to_string())?;
    println!("  Imported {} with {}.", c.name, plural(count, "skill"));
    Ok(())
}

pub fn export(ctx: &Context, output: Option<&Path>) -> Result<(), String> {
    let owner = ctx.owner()?;
    let json = ctx
        .store()?
        .export(&owner)
        .map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            fs::write(path, &json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            println!("  Exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
