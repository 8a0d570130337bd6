use burge_sheet::summary;
use colored::Colorize;

use super::{Context, plural};

pub fn check(ctx: &Context, name: &str) -> Result<(), String> {
    let owner = ctx.owner()?;
    let name = ctx
        .store()?
        .check_skill(&owner, name)
        .map_err(|e| e.to_string())?;
    println!("  {name} checked for advancement.");
    Ok(())
}

pub fn advance(ctx: &Context) -> Result<(), String> {
    let owner = ctx.owner()?;
    let mut roller = ctx.roller();
    let rolls = ctx
        .store()?
        .advance(&owner, &mut roller)
        .map_err(|e| e.to_string())?;

    if rolls.is_empty() {
        println!("  No skills are checked for advancement.");
        return Ok(());
    }

    for r in &rolls {
        let verdict = if r.passed {
            "eligible".green().bold()
        } else {
            "no change".dimmed()
        };
        println!("  {}: rolled {} vs {} → {verdict}", r.skill, r.roll, r.value);
    }
    let passed = rolls.iter().filter(|r| r.passed).count();
    println!();
    println!(
        "  {} can be improved with XP (burge spend <skill> [amount])",
        plural(passed, "skill")
    );
    Ok(())
}

pub fn spend(ctx: &Context, name: &str, amount: i32) -> Result<(), String> {
    let owner = ctx.owner()?;
    let spend = ctx
        .store()?
        .spend_xp(&owner, name, amount)
        .map_err(|e| e.to_string())?;
    println!(
        "  {}: {}→{} ({} XP spent, {} left)",
        spend.skill, spend.change.old, spend.change.new, spend.xp_spent, spend.xp_remaining
    );
    Ok(())
}

pub fn save(ctx: &Context, note: &str) -> Result<(), String> {
    let owner = ctx.owner()?;
    let note = Some(note.trim()).filter(|n| !n.is_empty());
    let entry = ctx
        .store()?
        .save_session(&owner, note)
        .map_err(|e| e.to_string())?;
    println!(
        "  Saved version {}: {} ({})",
        entry.version,
        entry.note.bold(),
        plural(entry.changes.len(), "change")
    );
    Ok(())
}

pub fn history(ctx: &Context, count: usize) -> Result<(), String> {
    let owner = ctx.owner()?;
    let entries = ctx
        .store()?
        .history(&owner, count)
        .map_err(|e| e.to_string())?;

    if entries.is_empty() {
        println!("  No saved sessions yet.");
        return Ok(());
    }
    for entry in &entries {
        for line in summary::history_text(entry).lines() {
            println!("  {line}");
        }
    }
    Ok(())
}
