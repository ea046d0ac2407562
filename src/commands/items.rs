//! Listing, creating and toggling items.

use super::{Context, Outcome};
use crate::models::{Item, ItemKind};
use crate::Result;
use std::io::{BufRead, Write};

pub(super) fn list<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>) -> Result<Outcome> {
    if ctx.store.is_empty() {
        ctx.console.say("There are no items in storage.")?;
        return Ok(Outcome::Continue);
    }

    for (index, item) in ctx.store.items().iter().enumerate() {
        ctx.console.say(format!("{}: {}", index, item))?;
    }
    Ok(Outcome::Continue)
}

pub(super) fn new<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>) -> Result<Outcome> {
    ctx.console.say("Select item type:")?;
    for (index, kind) in ItemKind::ALL.iter().enumerate() {
        ctx.console.say(format!("{}: {}", index, kind))?;
    }

    let kind = ItemKind::ALL[ctx.console.ask_index(ItemKind::ALL.len())?];
    ctx.console.say(format!("Selected: {}", kind))?;
    ctx.console.blank()?;

    let item = Item::construct(kind, ctx.console)?;
    ctx.console.say(format!("Added {}", item))?;
    ctx.console.blank()?;
    ctx.store.push(item);
    Ok(Outcome::Continue)
}

/// Set `done` on one item picked from the items currently in the opposite state.
pub(super) fn mark<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    done: bool,
) -> Result<Outcome> {
    let positions = ctx.store.positions_where_done(!done);
    if positions.is_empty() {
        let empty = if done {
            "There are no undone tasks"
        } else {
            "There are no done tasks"
        };
        ctx.console.say(empty)?;
        return Ok(Outcome::Continue);
    }

    ctx.console.say("Select task:")?;
    for (index, &position) in positions.iter().enumerate() {
        ctx.console
            .say(format!("{}: {}", index, ctx.store.items()[position]))?;
    }

    let selected = positions[ctx.console.ask_index(positions.len())?];
    let item = &mut ctx.store.items_mut()[selected];
    item.set_done(done);

    let label = if done { "Done(+)" } else { "Undone(-)" };
    ctx.console
        .say(format!("Task '{}' marked as {}", item.summary(), label))?;
    ctx.console.blank()?;
    Ok(Outcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Details;
    use crate::storage::Store;
    use crate::test_utils::{ScriptedConsole, output_of, scripted};

    fn task(heading: &str, done: bool) -> Item {
        let mut item = Item::new(Details::Task {
            heading: heading.to_string(),
            due: None,
        });
        item.set_done(done);
        item
    }

    fn context<'a>(
        store: &'a mut Store,
        console: &'a mut ScriptedConsole,
    ) -> Context<'a, std::io::Cursor<Vec<u8>>, Vec<u8>> {
        Context {
            store,
            console,
            storage: None,
        }
    }

    #[test]
    fn test_list_empty_store() {
        let mut store = Store::new();
        let mut console = scripted(&[]);
        list(&mut context(&mut store, &mut console)).unwrap();
        assert_eq!(output_of(&console), "There are no items in storage.\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_shows_full_list_positions() {
        let mut store = Store::with_items(vec![task("a", false), task("b", true)]);
        let mut console = scripted(&[]);
        list(&mut context(&mut store, &mut console)).unwrap();
        assert_eq!(output_of(&console), "0: - ToDo: a\n1: + ToDo: b\n");
    }

    #[test]
    fn test_new_appends_constructed_item() {
        let mut store = Store::new();
        let mut console = scripted(&["1", "oranges", "6"]);
        new(&mut context(&mut store, &mut console)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].render(), "- ToBuy: oranges (amount: 6)");
        let out = output_of(&console);
        assert!(out.contains("0: ToDoItem\n1: ToBuyItem\n2: ToReadItem\n"));
        assert!(out.contains("Selected: ToBuyItem"));
        assert!(out.contains("Added - ToBuy: oranges (amount: 6)"));
    }

    #[test]
    fn test_new_reprompts_on_bad_selection() {
        let mut store = Store::new();
        let mut console = scripted(&["two", "9", "2", "Dune", "https://example.org/dune"]);
        new(&mut context(&mut store, &mut console)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].kind(), ItemKind::Reading);
        let out = output_of(&console);
        assert!(out.contains("Bad input, try again."));
        assert!(out.contains("Selection out of range, try again."));
    }

    #[test]
    fn test_done_uses_filtered_positions() {
        let mut store = Store::with_items(vec![
            task("first", true),
            task("second", false),
            task("third", false),
        ]);
        let mut console = scripted(&["1"]);
        mark(&mut context(&mut store, &mut console), true).unwrap();

        // filtered position 1 is "third", full-list position 2
        assert!(!store.items()[1].is_done());
        assert!(store.items()[2].is_done());
        let out = output_of(&console);
        assert!(out.contains("Select task:\n0: - ToDo: second\n1: - ToDo: third\n"));
        assert!(out.contains("Task 'ToDo: third' marked as Done(+)"));
    }

    #[test]
    fn test_done_with_nothing_pending() {
        let mut store = Store::with_items(vec![task("a", true), task("b", true)]);
        let before = store.clone();
        let mut console = scripted(&[]);
        mark(&mut context(&mut store, &mut console), true).unwrap();

        assert_eq!(output_of(&console), "There are no undone tasks\n");
        assert_eq!(store, before);
    }

    #[test]
    fn test_undone_with_nothing_done() {
        let mut store = Store::with_items(vec![task("a", false)]);
        let mut console = scripted(&[]);
        mark(&mut context(&mut store, &mut console), false).unwrap();
        assert_eq!(output_of(&console), "There are no done tasks\n");
    }

    #[test]
    fn test_done_then_undone_restores_flag() {
        let mut store = Store::with_items(vec![task("a", true), task("b", false)]);
        let mut console = scripted(&["0", "1"]);
        mark(&mut context(&mut store, &mut console), true).unwrap();
        assert!(store.items()[1].is_done());

        // both done now; "b" is filtered position 1
        mark(&mut context(&mut store, &mut console), false).unwrap();
        assert!(!store.items()[1].is_done());
        assert!(store.items()[0].is_done());
        assert!(output_of(&console).contains("Task 'ToDo: b' marked as Undone(-)"));
    }
}
