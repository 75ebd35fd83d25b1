use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PANEL_WIDTH: usize = 60;

pub fn get_styles() -> Styles {
    let accent = Style::new()
        .bold()
        .underline()
        .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
    let good = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)));
    let bad = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Red)));
    Styles::styled()
        .usage(accent)
        .header(accent)
        .literal(good)
        .valid(good)
        .invalid(bad)
        .error(bad)
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

/// Muted, poster-like palette shared by both shells.
pub mod colors {
    use crossterm::style::Color;

    pub const GOLD: Color = Color::Rgb {
        r: 230,
        g: 180,
        b: 60,
    };
    pub const CREAM: Color = Color::Rgb {
        r: 245,
        g: 235,
        b: 210,
    };
    pub const TEAL: Color = Color::Rgb {
        r: 70,
        g: 170,
        b: 160,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 120,
        g: 200,
        b: 120,
    };
    pub const RED: Color = Color::Rgb {
        r: 220,
        g: 80,
        b: 70,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 240,
        g: 150,
        b: 50,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
}

mod glyphs {
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";
    pub const ARROW: &str = "▸";
    pub const BULLET: &str = "•";
    pub const EMPTY: &str = "◦";
    pub const CHECK: &str = "✓";
    pub const FAIL: &str = "✗";
}

// ─── Status lines ────────────────────────────────────────────────────────────

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        glyphs::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    eprintln!(
        " {} {}",
        glyphs::FAIL.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "!".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

// ─── Panels ──────────────────────────────────────────────────────────────────

pub fn print_section_header(title: &str) {
    let title_width = title.width();
    let left = PANEL_WIDTH.saturating_sub(title_width + 4) / 2;
    let right = PANEL_WIDTH.saturating_sub(title_width + 4 + left);

    println!();
    println!(
        "{}{} {} {}{}",
        glyphs::TOP_LEFT.with(colors::GOLD),
        glyphs::HORIZONTAL.repeat(left).with(colors::GOLD),
        title.with(colors::GOLD).bold(),
        glyphs::HORIZONTAL.repeat(right).with(colors::GOLD),
        glyphs::TOP_RIGHT.with(colors::GOLD),
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        glyphs::BOTTOM_LEFT.with(colors::GOLD),
        glyphs::HORIZONTAL.repeat(PANEL_WIDTH).with(colors::GOLD),
        glyphs::BOTTOM_RIGHT.with(colors::GOLD),
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::BULLET.with(colors::TEAL),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::CREAM)
    );
}

/// Prints the pair only when there is a value.
pub fn print_optional(key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        print_key_value(key, value);
    }
}

pub fn print_paragraph(text: &str) {
    for line in text.lines() {
        println!("    {}", line.with(colors::CREAM));
    }
}

pub fn print_list_item(item: &str, indent: usize) {
    println!(
        "{}{} {}",
        "  ".repeat(indent + 1),
        glyphs::ARROW.with(colors::TEAL),
        item.with(colors::CREAM)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        glyphs::EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

/// The view shown when a detail fetch comes back 404.
pub fn print_not_found(what: &str) {
    print_section_header("Ikke fundet");
    print_empty_list(&format!("{} findes ikke", what));
    print_section_footer();
}

// ─── Tables ──────────────────────────────────────────────────────────────────

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: &[&str]) -> Self {
        TableBuilder {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            col_widths: headers.iter().map(|h| h.width()).collect(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn print_rule(&self, left: &str, mid: &str, right: &str) {
        let segments: Vec<String> = self
            .col_widths
            .iter()
            .map(|w| glyphs::HORIZONTAL.repeat(w + 2))
            .collect();
        println!(
            "{}{}{}",
            left.with(colors::TEAL),
            segments.join(mid).with(colors::TEAL),
            right.with(colors::TEAL)
        );
    }

    fn print_cells(&self, cells: &[String], header: bool) {
        print!("{}", glyphs::VERTICAL.with(colors::TEAL));
        for (i, width) in self.col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = " ".repeat(width.saturating_sub(cell.width()));
            if header {
                print!(" {}{} ", cell.with(colors::GOLD).bold(), padding);
            } else {
                print!(" {}{} ", cell.with(colors::CREAM), padding);
            }
            print!("{}", glyphs::VERTICAL.with(colors::TEAL));
        }
        println!();
    }

    pub fn print(&self) {
        self.print_rule(glyphs::TOP_LEFT, glyphs::T_TOP, glyphs::TOP_RIGHT);
        self.print_cells(&self.headers, true);
        self.print_rule(glyphs::T_LEFT, glyphs::CROSS, glyphs::T_RIGHT);
        for row in &self.rows {
            self.print_cells(row, false);
        }
        self.print_rule(glyphs::BOTTOM_LEFT, glyphs::T_BOTTOM, glyphs::BOTTOM_RIGHT);
    }
}

// ─── Shell chrome ────────────────────────────────────────────────────────────

/// Plain text: rustyline measures the prompt width itself.
pub fn get_prompt(app: &str, location: &str) -> String {
    format!("{} {} › ", app, location)
}

pub fn print_welcome(app: &str, lines: &[(&str, String)]) {
    print_section_header(app);
    for (key, value) in lines {
        print_key_value(key, value);
    }
    println!();
    println!("  {}", "Skriv 'help' for at se kommandoerne".with(colors::DIM));
    print_section_footer();
}

pub fn print_goodbye() {
    println!("  {}", "Farvel!".with(colors::GOLD).bold());
}

/// One-line, human description of a count, e.g. "3 af 120".
pub fn count_of(shown: usize, total: u64) -> String {
    format!("{} af {}", shown, total)
}

/// Cuts `text` to at most `max` display columns, marking the cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
