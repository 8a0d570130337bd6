use burge_mechanics::{Adjustment, Characteristic, ResourceKind};
use burge_sheet::summary;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn create(ctx: &Context, name: &str, occupation: Option<&str>) -> Result<(), String> {
    let owner = ctx.owner()?;
    let mut store = ctx.store()?;
    let c = store
        .create(&owner, name, occupation)
        .map_err(|e| e.to_string())?;

    if c.occupation.is_empty() {
        println!("  Created {}.", c.name.bold());
    } else {
        println!("  Created {} ({}).", c.name.bold(), c.occupation);
    }
    println!("  Next: burge stats STR CON DEX SIZ POW APP INT EDU");
    Ok(())
}

pub fn show(ctx: &Context) -> Result<(), String> {
    let c = ctx
        .store()?
        .load(&ctx.owner()?)
        .map_err(|e| e.to_string())?;
    for line in summary::sheet_text(&c).lines() {
        println!("  {line}");
    }
    Ok(())
}

pub fn stats(ctx: &Context, values: &[i32]) -> Result<(), String> {
    let values: [i32; 8] = values
        .try_into()
        .map_err(|_| "expected exactly 8 values: STR CON DEX SIZ POW APP INT EDU".to_string())?;
    let owner = ctx.owner()?;
    let c = ctx
        .store()?
        .set_characteristics(&owner, values)
        .map_err(|e| e.to_string())?;

    let r = &c.resources;
    println!("  Characteristics set.");
    println!(
        "  HP {}/{}  MP {}/{}  SAN {}/{}",
        r.hp.current, r.hp.max, r.mp.current, r.mp.max, r.sanity.current, r.sanity.max
    );
    Ok(())
}

pub fn set(ctx: &Context, key: &str, value: &str) -> Result<(), String> {
    let owner = ctx.owner()?;
    let adjustment = Adjustment::parse(value).map_err(|e| e.to_string())?;
    let mut store = ctx.store()?;

    if let Ok(characteristic) = Characteristic::parse(key) {
        let change = store
            .set_characteristic(&owner, characteristic, &adjustment)
            .map_err(|e| e.to_string())?;
        println!("  {characteristic}: {}→{}", change.old, change.new);
        return Ok(());
    }

    let kind = ResourceKind::parse(key).map_err(|_| {
        format!("unknown field '{key}': expected STR..EDU or hp, mp, san, luck, xp")
    })?;
    let mut roller = ctx.roller();
    let result = store
        .set_resource(&owner, kind, &adjustment, &mut roller)
        .map_err(|e| e.to_string())?;

    let mut line = format!("  {kind}: {}→{}", result.change.old, result.change.new);
    if let Some(max) = result.max {
        line.push_str(&format!(" / {max}"));
    }
    if let Some(detail) = &result.detail {
        line.push_str(&format!(" ({detail})"));
    }
    println!("{line}");
    for signal in &result.signals {
        println!("  {}", signal.to_string().red().bold());
    }
    Ok(())
}

pub fn skill(ctx: &Context, name: &str, value: i32) -> Result<(), String> {
    let owner = ctx.owner()?;
    let (name, change) = ctx
        .store()?
        .set_skill(&owner, name, value)
        .map_err(|e| e.to_string())?;
    println!("  {name}: {}→{}", change.old, change.new);
    Ok(())
}

pub fn skills(ctx: &Context) -> Result<(), String> {
    let c = ctx
        .store()?
        .load(&ctx.owner()?)
        .map_err(|e| e.to_string())?;
    let lines = summary::skill_lines(&c);

    if lines.is_empty() {
        println!("  No skills recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Skill", "Value", "Half", "Fifth", ""]);
    for line in &lines {
        table.add_row(vec![
            line.name.clone(),
            line.value.to_string(),
            (line.value / 2).to_string(),
            (line.value / 5).to_string(),
            line.markers.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {}  (* custom, ✓ checked, ↑ eligible)", super::plural(lines.len(), "skill"));
    Ok(())
}

pub fn wound(ctx: &Context, state: &str) -> Result<(), String> {
    let state = match state.trim().to_lowercase().as_str() {
        "on" | "set" | "yes" => Some(true),
        "off" | "clear" | "no" => Some(false),
        "toggle" => None,
        other => return Err(format!("unknown wound state '{other}': use on, off or toggle")),
    };
    let owner = ctx.owner()?;
    let on = ctx
        .store()?
        .set_major_wound(&owner, state)
        .map_err(|e| e.to_string())?;
    if on {
        println!("  Major wound: {}", "on".red().bold());
    } else {
        println!("  Major wound: off");
    }
    Ok(())
}
