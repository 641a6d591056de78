//! HTML for the advice form and its results.

use pulldown_cmark::{html, CowStr, Event, Options, Parser};

use crate::advisor::AdviceRequest;
use crate::llm::provider::{MAX_TEMPERATURE, MIN_TEMPERATURE};
use crate::tools::{MAX_RESULTS, MIN_RESULTS};

/// Shown while the advisors are working on a submission.
pub const BUSY_MESSAGE: &str = "Thinking... the agents are working together...";

/// What to show below the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Empty,
    Warning(String),
    Error(String),
    Advice { markdown: String, filename: String },
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render model-written Markdown. Raw HTML in the source is shown as text.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        other => other,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// `data:` URL carrying the Markdown byte for byte.
pub fn download_href(markdown: &str) -> String {
    format!(
        "data:text/markdown;charset=utf-8,{}",
        urlencoding::encode(markdown)
    )
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; }
aside { width: 320px; padding: 1.5rem; background: #f3f6f1; }
main { flex: 1; padding: 1.5rem 2rem; max-width: 60rem; }
label { display: block; margin-top: 0.8rem; font-weight: 600; }
input[type=text], textarea { width: 100%; box-sizing: border-box; }
.warning { background: #fff4d6; padding: 0.8rem; border-radius: 4px; }
.error { background: #fde2e1; padding: 0.8rem; border-radius: 4px; }
.busy { font-style: italic; }
"#;

fn slider(name: &str, label: &str, min: String, max: String, step: &str, value: String) -> String {
    format!(
        r#"<label for="{name}">{label}: <output id="{name}_value">{value}</output></label>
<input type="range" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}"
 oninput="document.getElementById('{name}_value').value = this.value">"#
    )
}

fn form(request: &AdviceRequest) -> String {
    format!(
        r#"<form method="post" action="/advice" onsubmit="this.querySelector('button').disabled = true; document.getElementById('busy').hidden = false;">
<h2>Configuration</h2>
<label for="crop_name">Crop Name</label>
<input type="text" id="crop_name" name="crop_name" placeholder="e.g., Wheat, Rice, Tomato" value="{crop}">
<label for="location">Location</label>
<input type="text" id="location" name="location" placeholder="e.g., Bihar, Punjab" value="{location}">
<label for="symptoms">Describe Crop Issue</label>
<textarea id="symptoms" name="symptoms" rows="4" placeholder="e.g., Yellow leaves with brown spots...">{symptoms}</textarea>
<label for="soil_info">Soil Details (Optional)</label>
<textarea id="soil_info" name="soil_info" rows="3" placeholder="e.g., Sandy loam, pH 6.5...">{soil}</textarea>
<h3>LLM Settings</h3>
{temperature}
<h3>Search Tool Settings</h3>
{results}
<p><button type="submit">Get Smart Advice</button></p>
<p id="busy" class="busy" hidden>{busy}</p>
</form>"#,
        busy = BUSY_MESSAGE,
        crop = escape_html(&request.crop_name),
        location = escape_html(&request.location),
        symptoms = escape_html(&request.symptoms),
        soil = escape_html(&request.soil_info),
        temperature = slider(
            "temperature",
            "Temperature",
            MIN_TEMPERATURE.to_string(),
            MAX_TEMPERATURE.to_string(),
            "0.1",
            format!("{:.1}", request.effective_temperature()),
        ),
        results = slider(
            "search_results",
            "Number of Search Results",
            MIN_RESULTS.to_string(),
            MAX_RESULTS.to_string(),
            "1",
            request.effective_search_results().to_string(),
        ),
    )
}

fn outcome_html(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Empty => String::new(),
        Outcome::Warning(message) => {
            format!(r#"<div class="warning">{}</div>"#, escape_html(message))
        }
        Outcome::Error(message) => format!(
            r#"<div class="error">An error occurred: {}</div>"#,
            escape_html(message)
        ),
        Outcome::Advice { markdown, filename } => format!(
            r#"<h2>Smart Crop Advice</h2>
<article>{body}</article>
<p><a class="download" download="{filename}" href="{href}">Download Advice</a></p>"#,
            body = render_markdown(markdown),
            filename = escape_html(filename),
            href = escape_html(&download_href(markdown)),
        ),
    }
}

/// Full page: sidebar form plus whatever the last submission produced.
pub fn page(request: &AdviceRequest, outcome: &Outcome) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Crop Chat AI - Agentic Farming Assistant</title>
<style>{style}</style>
</head>
<body>
<aside>{form}</aside>
<main>
<h1>Smart Crop Advisor - Agentic AI for Farmers</h1>
<p>Ask questions about your crop health, irrigation, soil, or fertilizer use and let AI agents guide you.</p>
<details>
<summary>About This App</summary>
<p>This agentic system simulates a conversation with expert crop advisors.</p>
<ul>
<li><strong>Crop Doctor</strong>: Diagnoses plant problems and gives treatment.</li>
<li><strong>Weather Advisor</strong>: Recommends irrigation based on weather.</li>
<li><strong>Soil Expert</strong>: Gives suggestions based on soil condition.</li>
</ul>
<p>The advisors work through their tasks in turn, each building on the previous answers.</p>
</details>
{outcome}
<hr>
</main>
</body>
</html>"#,
        style = STYLE,
        form = form(request),
        outcome = outcome_html(outcome),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"pH" & 'N'</b>"#),
            "&lt;b&gt;&quot;pH&quot; &amp; &#39;N&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_markdown_is_rendered() {
        let html = render_markdown("## Diagnosis\n\n- **Leaf rust**\n- Apply fungicide");
        assert!(html.contains("<h2>Diagnosis</h2>"));
        assert!(html.contains("<strong>Leaf rust</strong>"));
        assert!(html.contains("<li>Apply fungicide</li>"));
    }

    #[test]
    fn test_raw_html_is_not_injected() {
        let html = render_markdown("Treat early.\n\n<script>alert(1)</script>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_download_href_decodes_to_raw() {
        let raw = "# Advice\n\nWater weekly, 50% less & \"early\".\r\nDone 🌾";
        let href = download_href(raw);
        let payload = href
            .strip_prefix("data:text/markdown;charset=utf-8,")
            .unwrap();
        assert!(!payload.contains('\n'));
        assert_eq!(urlencoding::decode(payload).unwrap(), raw);
    }

    #[test]
    fn test_form_keeps_submitted_values() {
        let request = AdviceRequest {
            crop_name: "Tomato".to_string(),
            symptoms: "Curling <leaves>".to_string(),
            temperature: 1.3,
            search_results: 5,
            ..Default::default()
        };
        let html = page(&request, &Outcome::Empty);
        assert!(html.contains(r#"value="Tomato""#));
        assert!(html.contains("Curling &lt;leaves&gt;"));
        assert!(html.contains(r#"value="1.3""#));
        assert!(html.contains(r#"value="5""#));
    }
}
