//! MDX body rendering: Markdown, syntax highlighting and site components

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// A JSX component usable inside post bodies and the HTML it renders to
struct Component {
    name: &'static str,
    tag: &'static str,
    class: &'static str,
}

const COMPONENTS: &[Component] = &[Component {
    name: "GlassCard",
    tag: "div",
    class: "glass-card",
}];

lazy_static! {
    static ref COMPONENT_OPEN: Regex =
        Regex::new(r"<([A-Z][A-Za-z0-9]*)((?:\s[^>]*?)?)\s*(/?)>").unwrap();
    static ref COMPONENT_CLOSE: Regex = Regex::new(r"</([A-Z][A-Za-z0-9]*)\s*>").unwrap();
    static ref CLASS_NAME: Regex = Regex::new(r#"\s*className="([^"]*)""#).unwrap();
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render an MDX body to HTML
    pub fn render(&self, markdown: &str) -> String {
        self.render_with(markdown, true)
    }

    /// Render text a visitor typed. Raw HTML and components are shown as
    /// text and script links are dropped.
    pub fn render_untrusted(&self, markdown: &str) -> String {
        self.render_with(markdown, false)
    }

    fn render_with(&self, markdown: &str, trusted: bool) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // (language, source) of the code block being collected
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(highlighted.into()));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                Event::Html(raw) | Event::InlineHtml(raw) if !trusted => {
                    events.push(Event::Text(raw))
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) if !trusted && is_script_url(&dest_url) => {
                    events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: "#".into(),
                        title,
                        id,
                    }))
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) if !trusted && is_script_url(&dest_url) => {
                    events.push(Event::Start(Tag::Image {
                        link_type,
                        dest_url: "".into(),
                        title,
                        id,
                    }))
                }
                Event::Html(raw) => events.push(Event::Html(expand_components(&raw).into())),
                Event::InlineHtml(raw) => {
                    events.push(Event::InlineHtml(expand_components(&raw).into()))
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace known JSX components in raw HTML with their plain HTML form.
///
/// Unknown capitalised tags are left untouched.
fn expand_components(raw: &str) -> String {
    let opened = COMPONENT_OPEN.replace_all(raw, |caps: &Captures| {
        let Some(component) = lookup_component(&caps[1]) else {
            return caps[0].to_string();
        };

        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let mut class = component.class.to_string();
        if let Some(extra) = CLASS_NAME.captures(attrs) {
            class.push(' ');
            class.push_str(&extra[1]);
        }
        let attrs = CLASS_NAME.replace(attrs, "");
        let attrs = attrs.trim_end();

        let mut tag = format!(r#"<{} class="{}"{}>"#, component.tag, class, attrs);
        if !caps[3].is_empty() {
            tag.push_str(&format!("</{}>", component.tag));
        }
        tag
    });

    COMPONENT_CLOSE
        .replace_all(&opened, |caps: &Captures| match lookup_component(&caps[1]) {
            Some(component) => format!("</{}>", component.tag),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn lookup_component(name: &str) -> Option<&'static Component> {
    COMPONENTS.iter().find(|c| c.name == name)
}

/// URL schemes that run code when followed
fn is_script_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
