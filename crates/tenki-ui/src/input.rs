//! Line commands for the terminal region selector.

use tenki_forecast::regions;

use crate::models::forecast_model::Selection;

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select this option and submit it.
    Choose(Selection),
    /// Print the region menu again.
    List,
    Quit,
}

impl Command {
    /// Menu numbers 1–11 pick a listed region, `-` or a blank line picks the
    /// empty option, and any other token is submitted as a raw region id.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" | "-" => Self::Choose(Selection::None),
            "q" | "quit" | "exit" => Self::Quit,
            "l" | "list" | "?" => Self::List,
            _ => {
                let by_position = line
                    .parse::<usize>()
                    .ok()
                    .filter(|_| line.len() <= 2)
                    .and_then(regions::by_index);
                match by_position {
                    Some(region) => Self::Choose(Selection::Region(region.id.to_string())),
                    None => Self::Choose(Selection::from_id(line)),
                }
            }
        }
    }
}
