// Fri Oct 16 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    subtitle: Option<String>,
    version: Option<String>,
    use_color: bool,
    width: usize,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            version: None,
            use_color: true,
            width: 50,
        }
    }

    pub fn for_run(workers: usize, start: u64, end: u64) -> Self {
        Self::new("Collatz Range Runner")
            .with_subtitle(&format!("{} to {} on {} workers", start, end, workers))
            .with_version(env!("CARGO_PKG_VERSION"))
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn render(&self) -> String {
        self.render_box()
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }

    fn render_box(&self) -> String {
        let inner_width = self.width.max(self.title.len() + 4) - 4;
        let h_line = "─".repeat(inner_width + 2);
        let mut lines = vec![format!("┌{}┐", h_line)];

        let title_line = format!("{:^width$}", self.title, width = inner_width);
        if self.use_color {
            lines.push(format!("│ {} │", title_line.cyan().bold()));
        } else {
            lines.push(format!("│ {} │", title_line));
        }

        if let Some(subtitle) = &self.subtitle {
            lines.push(format!("│ {:^width$} │", subtitle, width = inner_width));
        }

        if let Some(version) = &self.version {
            lines.push(format!("├{}┤", h_line));
            let ver_line = format!("{:^width$}", format!("v{}", version), width = inner_width);
            if self.use_color {
                lines.push(format!("│ {} │", ver_line.green()));
            } else {
                lines.push(format!("│ {} │", ver_line));
            }
        }

        lines.push(format!("└{}┘", h_line));
        lines.join("\n")
    }
}
