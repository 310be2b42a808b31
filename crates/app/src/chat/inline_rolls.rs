use vttkit_ports::inbound::ChatMessage;

/// Replace each `$[[k]]` inline-roll placeholder in the message content with
/// the roll's result: table-draw item names (comma-joined) when the roll
/// drew from a rollable table, the numeric total otherwise.
pub fn substitute_inline_rolls(message: &ChatMessage) -> String {
    let mut content = message.content.clone();
    for (index, roll) in message.inline_rolls.iter().enumerate() {
        let placeholder = format!("$[[{index}]]");
        let replacement = if roll.table_items.is_empty() {
            format_total(roll.total)
        } else {
            roll.table_items.join(", ")
        };
        content = content.replacen(&placeholder, &replacement, 1);
    }
    content
}

fn format_total(total: f64) -> String {
    if total.fract() == 0.0 && total.abs() < 1e15 {
        format!("{}", total as i64)
    } else {
        total.to_string()
    }
}
