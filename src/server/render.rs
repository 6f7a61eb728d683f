// HTML fragments shared by both surfaces.
use crate::dispatcher::DispatchResult;
use crate::knowledge::LocationEntry;

pub const TITLE: &str = "T.OUR : 최선의 관광지를 추천해드립니다";
pub const PROMPT_LABEL: &str = "안성의 관광명소에 대해 물어보세요!";
pub const SUBMIT_LABEL: &str = "대답하기";
pub const FAILURE_MESSAGE: &str = "죄송합니다. 지금은 답변을 드릴 수 없습니다.";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Plain endpoint output: image, then bold name and description, per spot.
pub fn endpoint_fragment(result: &DispatchResult) -> String {
    match result {
        DispatchResult::LocationList(entries) => entries
            .iter()
            .map(|entry| {
                let name = escape_html(&entry.name);
                format!(
                    "<img src='{}' alt='{}'><br><strong>{}</strong>: {}<br>",
                    escape_html(&entry.image_ref),
                    name,
                    name,
                    escape_html(&entry.description)
                )
            })
            .collect(),
        DispatchResult::GeneratedText(text) => escape_html(text),
    }
}

fn spot_card(entry: &LocationEntry) -> String {
    let name = escape_html(&entry.name);
    format!(
        "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n\
         <p><strong>{}</strong>: {}</p>\n",
        escape_html(&entry.image_ref),
        name,
        name,
        name,
        escape_html(&entry.description)
    )
}

/// Form page, optionally followed by the answer to the last submission.
pub fn form_page(user_input: &str, answer: Option<&str>) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n\
         <h1>{title}</h1>\n\
         <form method=\"post\" action=\"/\">\n\
         <label for=\"user_input\">{label}</label>\n\
         <input type=\"text\" id=\"user_input\" name=\"user_input\" value=\"{value}\">\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>\n\
         <section id=\"answer\">\n{answer}</section>\n</body>\n</html>\n",
        title = TITLE,
        label = PROMPT_LABEL,
        value = escape_html(user_input),
        submit = SUBMIT_LABEL,
        answer = answer.unwrap_or_default(),
    )
}

pub fn form_answer(result: &DispatchResult) -> String {
    match result {
        DispatchResult::LocationList(entries) => entries.iter().map(spot_card).collect(),
        DispatchResult::GeneratedText(text) => format!("<p>{}</p>\n", escape_html(text)),
    }
}
