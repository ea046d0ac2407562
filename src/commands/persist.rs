//! Moving items between the store and the storage file.

use super::{Context, Outcome};
use crate::{Error, Result};
use std::io::{BufRead, Write};

pub(super) fn save<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>) -> Result<Outcome> {
    match ctx.store.save(ctx.storage) {
        Ok(()) => {
            if let Some(path) = ctx.storage {
                ctx.console
                    .say(format!("Your list has been saved to {}.", path.display()))?;
            }
        }
        Err(Error::NoStorageConfigured) => {
            ctx.console.say(
                "Can't save. To enable saving, restart the program with --storage <path>.",
            )?;
        }
        Err(e) => return Err(e),
    }
    Ok(Outcome::Continue)
}

/// Append the storage file's items to the store.
pub(super) fn open<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>) -> Result<Outcome> {
    let Some(path) = ctx.storage else {
        ctx.console.say("No file for load data")?;
        return Ok(Outcome::Continue);
    };

    let added = ctx.store.open(Some(path))?;
    if added > 0 {
        ctx.console
            .say(format!("Loaded {} item(s) from {}.", added, path.display()))?;
    }
    Ok(Outcome::Continue)
}
