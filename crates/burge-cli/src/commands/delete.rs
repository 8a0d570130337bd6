use super::Context;

/// Without a token, open a delete request. With one, confirm it.
pub fn run(ctx: &Context, token: Option<&str>) -> Result<(), String> {
    let owner = ctx.owner()?;
    let mut store = ctx.store()?;

    let result = match token {
        None => store.request_delete(&owner).map(|request| {
            let window = (request.expires_at - request.requested_at).num_seconds();
            println!("  Delete {}? This cannot be undone.", request.name);
            println!("  Run `burge delete confirm` within {window} seconds.");
        }),
        Some(token) => store.confirm_delete(&owner, token).map(|c| {
            println!("  Deleted {}.", c.name);
        }),
    };

    // the ledger changes on success and on expiry alike
    ctx.save_ledger(&store)?;
    result.map_err(|e| e.to_string())
}
