use burge_mechanics::{Characteristic, Difficulty, parse_modifier, roll_dice};
use colored::Colorize;

use super::Context;

pub fn check(
    ctx: &Context,
    target: &str,
    modifier: Option<&str>,
    difficulty: Difficulty,
) -> Result<(), String> {
    let (bonus, penalty) = match modifier {
        Some(m) => match parse_modifier(m) {
            (0, 0) => return Err(format!("invalid modifier '{m}': use +N or -N")),
            dice => dice,
        },
        None => (0, 0),
    };
    let owner = ctx.owner()?;
    let mut store = ctx.store()?;
    let mut roller = ctx.roller();

    let report = match Characteristic::parse(target) {
        Ok(key) => store.roll_characteristic(&owner, key, difficulty, bonus, penalty, &mut roller),
        Err(_) => store.roll_skill(&owner, target, difficulty, bonus, penalty, &mut roller),
    }
    .map_err(|e| e.to_string())?;

    let success = report.outcome.is_success();
    for line in report.render().lines() {
        if line.starts_with("Roll:") {
            let colored = if success { line.green() } else { line.red() };
            println!("  {}", colored.bold());
        } else {
            println!("  {line}");
        }
    }
    Ok(())
}

pub fn dice(ctx: &Context, notation: &str) -> Result<(), String> {
    let mut roller = ctx.roller();
    let roll = roll_dice(notation, &mut roller)
        .ok_or_else(|| format!("invalid dice notation '{notation}'"))?;

    let faces: Vec<String> = roll.rolls.iter().map(ToString::to_string).collect();
    println!(
        "  {}: [{}] = {}",
        roll.notation,
        faces.join(", "),
        roll.total.to_string().bold()
    );
    Ok(())
}
