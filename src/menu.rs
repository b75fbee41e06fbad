use crate::models::{Item, MenuAction};

/// Entries of the main menu, in display order
pub fn menu_items() -> Vec<Item> {
    MenuAction::ALL.into_iter().map(Item::Menu).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_items_are_stable() {
        let first = menu_items();
        let second = menu_items();
        assert_eq!(first, second);

        let ids: Vec<&str> = first.iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["shell", "logs", "stop", "restart", "list"]);
    }

    #[test]
    fn test_menu_items_display_names() {
        let names: Vec<String> = menu_items().iter().map(|i| i.name().to_string()).collect();
        assert_eq!(names, ["Shell", "Logs", "Stop", "Restart", "List"]);
    }
}
