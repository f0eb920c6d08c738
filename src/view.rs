use dailymenu_menu::{MealSlot, SlotView, TodayMenu};

/// Render the day's menu for the terminal: a date header, one line per
/// visible slot, and a nudge when a candidate list is running low.
pub fn render(menu: &TodayMenu) -> String {
    let mut out = String::new();
    out.push_str(&menu.date.format("%A, %B %-d, %Y").to_string());
    out.push('\n');

    for view in menu.visible() {
        out.push('\n');
        out.push_str(&slot_line(view));
        if let Some(count) = view.low_inventory {
            out.push('\n');
            out.push_str(&format!(
                "  Please add more {} items to your list! (Currently {} options)",
                source_name(view),
                count
            ));
        }
    }

    let hidden: Vec<&str> = menu
        .slots
        .iter()
        .filter(|view| !view.revealed)
        .map(|view| view.slot.as_ref())
        .collect();
    if !hidden.is_empty() {
        out.push('\n');
        for name in hidden {
            out.push('\n');
            out.push_str(&format!("Feeling like more? Run `dailymenu {name}`."));
        }
    }

    out
}

fn slot_line(view: &SlotView) -> String {
    match &view.item {
        Some(item) if view.easy_used => format!("{}: {} (easy option)", view.slot.label(), item),
        Some(item) => format!("{}: {}", view.slot.label(), item),
        None => format!(
            "{}: No {} items available.",
            view.slot.label(),
            source_name(view)
        ),
    }
}

/// The category the slot currently draws from.
fn source_name(view: &SlotView) -> String {
    let source = if view.easy_used {
        view.slot.easy_source().unwrap_or(view.slot.source())
    } else {
        view.slot.source()
    };
    source.to_string()
}
