#[derive(Clone, Copy, Debug)]
pub struct Glyphs {
    pub focus_marker: &'static str,
    pub error_prefix: &'static str,
    pub valid_mark: &'static str,
    pub button_left: &'static str,
    pub button_right: &'static str,
    pub h_separator: &'static str,
    pub copied_prefix: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        focus_marker: ">",
        error_prefix: "! ",
        valid_mark: "ok",
        button_left: "[ ",
        button_right: " ]",
        h_separator: "-",
        copied_prefix: "* ",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        focus_marker: "▶",
        error_prefix: "✗ ",
        valid_mark: "✓",
        button_left: "⟦ ",
        button_right: " ⟧",
        h_separator: "─",
        copied_prefix: "📋 ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_glyphs_are_ascii() {
        let g = select(false);
        for s in [
            g.focus_marker,
            g.error_prefix,
            g.valid_mark,
            g.button_left,
            g.button_right,
            g.h_separator,
            g.copied_prefix,
        ] {
            assert!(s.is_ascii(), "{s:?} is not ASCII");
        }
    }
}
