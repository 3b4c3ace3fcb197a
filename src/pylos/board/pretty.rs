use crate::pylos::prelude::*;

impl Board {
    /// Pretty-prints the board one level at a time, base first, followed by the reserves.
    pub fn pretty(&self) -> String {
        let mut lines = (0..NUM_LEVELS).flat_map(|z| {
            let size = level_size(z);
            let indent = " ".repeat(z);
            (0..size).map(move |y| {
                let row = (0..size).map(|x| {
                    let loc = Location(
                        (level_offset(z) + y * size + x) as u8
                    );
                    Color::repr(self.color_at(loc))
                }).collect::<Vec<_>>().join(" ");
                format!("{indent}{row}")
            }).chain(std::iter::once(String::new()))
        }).collect::<Vec<_>>();
        lines.push(format!(
            "reserves: {} {}, {} {}",
            Color::Light, self.reserve(Color::Light), Color::Dark, self.reserve(Color::Dark)
        ));
        lines.join("\n")
    }
}
