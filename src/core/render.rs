//! HTML rendering of the coverage index page.

use anyhow::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;
use std::fmt::Write;

use super::listing::Entry;

pub const DEFAULT_TITLE: &str = "Zipios coverage, statistics, and test log information";
pub const DEFAULT_HEADING: &str = "Zipios coverage";
pub const DEFAULT_HOME_URL: &str = "/";
pub const DEFAULT_HOME_TITLE: &str = "Zipios Home Page";
pub const DEFAULT_LOGO: &str = "../images/zipios.jpg";

/// Suffixes appended to an entry name for the statistics and test log links
pub const STATISTICS_SUFFIX: &str = "/statistics.html";
pub const TEST_LOG_SUFFIX: &str = "/test_log.html";

/// Header block sent ahead of the page when running as a CGI handler
pub const CGI_HEADER: &str = "Content-Type: text/html; charset=utf-8\r\n\r\n";

/// Characters of an entry name that must be encoded in a relative href path.
/// Covers the HTML-significant characters too, so an encoded name needs no escaping.
const HREF_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const STYLE: &str = "body{font-family:sans-serif;}";

/// Size estimation constants for pre-allocation.
const PAGE_BASE_SIZE: usize = 600;
const PAGE_ROW_SIZE: usize = 160;

/// Page layout settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    pub heading: String,
    /// Target of the logo link; the logo is shown unlinked when absent
    pub home_url: Option<String>,
    pub home_title: String,
    /// Logo image source; no banner is rendered when absent
    pub logo: Option<String>,
    /// Escape entry names before embedding them in the page
    pub escape_names: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            heading: DEFAULT_HEADING.to_string(),
            home_url: Some(DEFAULT_HOME_URL.to_string()),
            home_title: DEFAULT_HOME_TITLE.to_string(),
            logo: Some(DEFAULT_LOGO.to_string()),
            escape_names: true,
        }
    }
}

/// The three link targets of one table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLinks {
    pub coverage: String,
    pub statistics: String,
    pub test_log: String,
}

impl IndexLinks {
    pub fn for_name(name: &str) -> Self {
        Self {
            coverage: name.to_string(),
            statistics: format!("{name}{STATISTICS_SUFFIX}"),
            test_log: format!("{name}{TEST_LOG_SUFFIX}"),
        }
    }

    fn as_array(&self) -> [&str; 3] {
        [&self.coverage, &self.statistics, &self.test_log]
    }
}

/// Percent-encode an entry name for use as an href path segment
pub fn encode_href(name: &str) -> Cow<'_, str> {
    utf8_percent_encode(name, HREF_ENCODE_SET).into()
}

/// Escape the characters that are significant in HTML text and attributes
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Render the complete index document for `entries`, in the given order
pub fn render_page(entries: &[Entry], options: &PageOptions) -> Result<String> {
    let mut output = String::with_capacity(PAGE_BASE_SIZE + entries.len() * PAGE_ROW_SIZE);

    writeln!(
        output,
        "<html><head><title>{}</title><style>{STYLE}</style></head>",
        escape_html(&options.title)
    )?;

    output.push_str("<body>");
    write_banner(&mut output, options)?;
    writeln!(output, "<h1>{}</h1>", escape_html(&options.heading))?;

    writeln!(
        output,
        r#"<table border="1" cellpadding="10" cellspacing="0"><tbody><tr><th>Coverage</th><th>Statistics</th><th>Test Logs</th></tr>"#
    )?;
    for entry in entries {
        write_row(&mut output, &entry.name, options.escape_names)?;
    }
    writeln!(output, "</tbody></table></body></html>")?;

    Ok(output)
}

fn write_banner(output: &mut String, options: &PageOptions) -> std::fmt::Result {
    let Some(logo) = &options.logo else {
        return Ok(());
    };

    output.push_str(r#"<p style="text-align: center;">"#);
    let image = format!(
        r#"<img src="{}" style="width: auto; height: 40px;"/>"#,
        escape_html(logo)
    );
    match &options.home_url {
        Some(url) => write!(
            output,
            r#"<a href="{}" title="{}">{image}</a>"#,
            escape_html(url),
            escape_html(&options.home_title)
        )?,
        None => output.push_str(&image),
    }
    output.push_str("</p>");
    Ok(())
}

fn write_row(output: &mut String, name: &str, escape: bool) -> std::fmt::Result {
    let (hrefs, labels) = if escape {
        (
            IndexLinks::for_name(&encode_href(name)),
            IndexLinks::for_name(&escape_html(name)),
        )
    } else {
        (IndexLinks::for_name(name), IndexLinks::for_name(name))
    };

    output.push_str("<tr>");
    for (href, label) in hrefs.as_array().into_iter().zip(labels.as_array()) {
        write!(output, r#"<td><a href="{href}">{label}</a></td>"#)?;
    }
    output.push_str("</tr>\n");
    Ok(())
}
