use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Soft greens and pastels for the terminal.
pub struct Leaf;

impl Leaf {
    pub fn default_leaf_skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(Leaf::FG);
        skin.bold.set_fg(Leaf::FG);
        skin.italic.set_fg(Leaf::FG);

        skin.headers[0].set_fg(Leaf::GREEN);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(Leaf::PINK);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.headers[2].set_fg(Leaf::BLUE);
        skin.headers[2].add_attr(Attribute::Bold);

        skin.table.set_fg(Leaf::GREEN);
        skin.bullet.set_fg(Leaf::PINK);
        skin.quote_mark.set_char('┃');
        skin.quote_mark.set_fg(Leaf::COMMENT);
        skin.inline_code.set_fg(Leaf::YELLOW);
        skin.inline_code.set_bg(Leaf::BG);

        skin
    }

    pub const BG: Color = Color::Rgb {
        r: 0x28,
        g: 0x2C,
        b: 0x34,
    }; // #282C34
    pub const FG: Color = Color::Rgb {
        r: 0xAB,
        g: 0xB2,
        b: 0xBF,
    }; // #ABB2BF
    pub const GREEN: Color = Color::Rgb {
        r: 0x4C,
        g: 0xAF,
        b: 0x50,
    }; // #4CAF50
    pub const PINK: Color = Color::Rgb {
        r: 0xF4,
        g: 0x8F,
        b: 0xB1,
    }; // #F48FB1
    pub const YELLOW: Color = Color::Rgb {
        r: 0xE5,
        g: 0xC0,
        b: 0x7B,
    }; // #E5C07B
    pub const BLUE: Color = Color::Rgb {
        r: 0x61,
        g: 0xAF,
        b: 0xEF,
    }; // #61AFEF
    pub const COMMENT: Color = Color::Rgb {
        r: 0x5C,
        g: 0x63,
        b: 0x70,
    }; // #5C6370
}
