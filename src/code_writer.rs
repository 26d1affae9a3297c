#[derive(Debug, Clone)]
pub struct CodeFileOptions {
    pub line_break: String,
    pub indent: String,
}

impl Default for CodeFileOptions {
    fn default() -> Self {
        CodeFileOptions {
            line_break: default_line_break(),
            indent: "  ".to_string(),
        }
    }
}

pub fn default_line_break() -> String {
    if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }.to_string()
}

pub struct CodeFile {
    line_break: String,
    indent_sign: String,
    indent_level: usize,
    content: String
}

impl CodeFile {
    pub fn new(options: &CodeFileOptions) -> CodeFile {
        CodeFile {
            line_break: options.line_break.to_string(),
            indent_sign: options.indent.to_string(),
            indent_level: 0,
            content: String::new()
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn deindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn line(&mut self, code: &str) {
        let indent = self.indent_sign.repeat(self.indent_level);
        self.content.push_str(&indent);
        self.content.push_str(code);
        self.content.push_str(&self.line_break);
    }

    pub fn blank_line(&mut self) {
        self.content.push_str(&self.line_break);
    }

    pub fn begin_indent(&mut self, code: &str) {
        self.line(code);
        self.indent();
    }

    pub fn end_indent(&mut self, code: &str) {
        self.deindent();
        self.line(code);
    }

    /// JSDoc comment; single line when it fits on one.
    pub fn doc_comment(&mut self, lines: &[String]) {
        match lines {
            [] => (),
            [single] => self.line(&format!("/** {} */", single)),
            _ => {
                self.line("/**");
                for line in lines {
                    if line.is_empty() {
                        self.line(" *");
                    } else {
                        self.line(&format!(" * {}", line));
                    }
                }
                self.line(" */");
            }
        }
    }

    pub fn build_string(self) -> String {
        self.content
    }
}
