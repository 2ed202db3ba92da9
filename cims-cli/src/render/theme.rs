use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Navy-on-pale palette used across the terminal views.
pub struct Harbor;

impl Harbor {
    pub fn default_harbor_skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(Harbor::FG);
        skin.bold.set_fg(Harbor::FG);
        skin.italic.set_fg(Harbor::FG);

        skin.headers[0].set_fg(Harbor::NAVY);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(Harbor::SKY);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.headers[2].set_fg(Harbor::SKY);

        skin.table.set_fg(Harbor::SKY);
        skin.bullet.set_fg(Harbor::AMBER);
        skin.inline_code.set_fg(Harbor::GREEN);
        skin.inline_code.set_bg(Harbor::BG);

        skin
    }

    pub const BG: Color = Color::Rgb {
        r: 0x1E,
        g: 0x26,
        b: 0x33,
    }; // #1E2633
    pub const FG: Color = Color::Rgb {
        r: 0xF4,
        g: 0xF7,
        b: 0xFA,
    }; // #F4F7FA
    pub const NAVY: Color = Color::Rgb {
        r: 0x4D,
        g: 0x7C,
        b: 0xC7,
    }; // #4D7CC7
    pub const SKY: Color = Color::Rgb {
        r: 0xD6,
        g: 0xE4,
        b: 0xFF,
    }; // #D6E4FF
    pub const GREEN: Color = Color::Rgb {
        r: 0x98,
        g: 0xC3,
        b: 0x79,
    }; // #98C379
    pub const AMBER: Color = Color::Rgb {
        r: 0xE5,
        g: 0xC0,
        b: 0x7B,
    }; // #E5C07B
    pub const RED: Color = Color::Rgb {
        r: 0xE0,
        g: 0x6C,
        b: 0x75,
    }; // #E06C75
}
