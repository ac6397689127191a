//! HTML and plain-text bodies for newsletter emails.
//!
//! Every template produces both alternatives. User-supplied text (names,
//! titles, the digest intro) is HTML-escaped before it reaches markup.

use codetimes_core::digest::{period_phrase, DigestItem};
use codetimes_core::html::escape_html;
use codetimes_core::interests::Interest;

const MASTHEAD: &str = "The Code Times";
const SIGNATURE: &str = "Dr. Odera Ezenna";

/// A rendered message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Inputs for the periodic digest.
#[derive(Debug, Clone)]
pub struct DigestContent<'a> {
    pub subject: &'a str,
    pub intro: &'a str,
    pub period_label: Option<&'a str>,
    pub blog: &'a [DigestItem],
    pub teaching: &'a [DigestItem],
    pub site_url: &'a str,
    pub unsubscribe_url: &'a str,
}

fn logo_url(site_url: &str) -> String {
    format!("{}/assets/drcode-logo.png", site_url.trim_end_matches('/'))
}

/// Newspaper-style frame shared by the welcome and digest emails.
fn frame(site_url: &str, subheading: &str, body: &str, unsubscribe_url: &str) -> String {
    format!(
        r#"<div style="margin:0;padding:0;background:#f5f5f5;font-family:Georgia,serif">
<div style="max-width:680px;margin:0 auto;background:#fff;padding:24px;border:1px solid #e6e6e6">
<div style="text-align:center"><img src="{logo}" alt="Dr Code logo" width="90" height="90" style="display:inline-block;border:0"></div>
<hr style="border:0;border-top:2px solid #111;margin:14px 0">
<h1 style="margin:8px 0 0;font-size:36px;line-height:1.1;text-align:center">{MASTHEAD}</h1>
<div style="text-align:center;color:#666;margin:6px 0 10px;font-size:14px">{subheading}</div>
<hr style="border:0;border-top:2px solid #111;margin:14px 0">
{body}
<p style="text-align:center;color:#666;font-size:12px;margin-top:16px">Don't want these emails? <a href="{unsubscribe}" style="color:#666">Unsubscribe</a></p>
</div>
</div>"#,
        logo = escape_html(&logo_url(site_url)),
        subheading = escape_html(subheading),
        unsubscribe = escape_html(unsubscribe_url),
    )
}

pub fn welcome(name: &str, site_url: &str, unsubscribe_url: &str) -> Rendered {
    let name = match name.trim() {
        "" | "Anonymous" => "there",
        n => n,
    };
    let body = format!(
        r#"<p style="font-size:16px;line-height:1.5">Hi {name},</p>
<p style="font-size:16px;line-height:1.5">Thanks for subscribing! You'll get occasional updates on new blog posts, teaching notes, and announcements, laid out like a tidy little newspaper.</p>
<p style="font-size:16px;line-height:1.5">While you wait, feel free to browse recent articles and teaching posts on the site. I'm glad you're here.</p>
<p style="font-size:16px;line-height:1.5">{SIGNATURE}</p>
<hr style="border:0;border-top:1px dotted #999;margin:18px 0">
<p style="color:#666;font-size:14px">You can update your interests or unsubscribe at any time.</p>"#,
        name = escape_html(name),
    );

    let text = format!(
        "Hi {name},\n\n\
         Thanks for subscribing! You'll get occasional updates on new blog posts, \
         teaching notes, and announcements.\n\n\
         Browse the site: {site_url}\n\n\
         {SIGNATURE}\n\n\
         Unsubscribe: {unsubscribe_url}\n"
    );

    Rendered {
        subject: format!("Thanks for subscribing to {MASTHEAD}"),
        html: frame(site_url, "Welcome to the newsletter", &body, unsubscribe_url),
        text,
    }
}

pub fn new_post(kind: Interest, title: &str, post_url: &str, unsubscribe_url: &str) -> Rendered {
    let kind_lower = kind.as_str().to_lowercase();
    let html = format!(
        r#"<div style="font-family:Georgia,serif">
<p>Hi there,</p>
<p>A new {kind_lower} titled <strong>{title}</strong> has just been published.</p>
<p><a href="{url}">Click here to read it</a></p>
<p>{SIGNATURE}</p>
<p style="color:#666;font-size:12px"><a href="{unsubscribe}" style="color:#666">Unsubscribe</a></p>
</div>"#,
        title = escape_html(title),
        url = escape_html(post_url),
        unsubscribe = escape_html(unsubscribe_url),
    );
    let text = format!(
        "Hi there,\n\n\
         A new {kind_lower} titled \"{title}\" has just been published.\n\n\
         Read it: {post_url}\n\n\
         {SIGNATURE}\n\n\
         Unsubscribe: {unsubscribe_url}\n"
    );

    Rendered {
        subject: format!("New {kind} Post: {title}"),
        html,
        text,
    }
}

fn html_section(heading: &str, items: &[DigestItem], empty: &str) -> String {
    let list = if items.is_empty() {
        format!(r#"<p style="color:#666;font-size:14px;margin-top:6px">{empty}</p>"#)
    } else {
        let entries: String = items
            .iter()
            .map(|item| {
                format!(
                    r#"<li style="margin-bottom:8px;font-size:15px"><a href="{}" style="color:#111">{}</a></li>"#,
                    escape_html(&item.url),
                    escape_html(&item.title)
                )
            })
            .collect();
        format!(r#"<ul style="padding-left:18px;margin:6px 0 0">{entries}</ul>"#)
    };
    format!(
        r#"<hr style="border:0;border-top:1px dotted #999;margin:18px 0">
<h3 style="font-size:18px;margin:0 0 8px">{heading}</h3>
{list}"#
    )
}

fn text_section(heading: &str, items: &[DigestItem], empty: &str) -> String {
    let mut out = format!("{heading}\n");
    if items.is_empty() {
        out.push_str(&format!("  {empty}\n"));
    }
    for item in items {
        out.push_str(&format!("  - {}: {}\n", item.title, item.url));
    }
    out
}

pub fn digest(content: &DigestContent<'_>) -> Rendered {
    let phrase = period_phrase(content.period_label);
    let blog_heading = format!("Blog posts released {phrase}");
    let teaching_heading = format!("New teaching released {phrase}");
    let blog_empty = "No new blog posts in this period.";
    let teaching_empty = "No teaching updates in this period.";

    let body = format!(
        r#"<p style="font-size:16px;margin-top:14px">{intro}</p>
{blog}
{teaching}
<hr style="border:0;border-top:1px dotted #999;margin:18px 0">
<p style="font-size:14px;margin-top:10px">{SIGNATURE}</p>"#,
        intro = escape_html(content.intro),
        blog = html_section(&blog_heading, content.blog, blog_empty),
        teaching = html_section(&teaching_heading, content.teaching, teaching_empty),
    );

    let text = format!(
        "{MASTHEAD}\n{label}\n\n{intro}\n\n{blog}\n{teaching}\n{SIGNATURE}\n\nUnsubscribe: {unsubscribe}\n",
        label = content.period_label.unwrap_or_default(),
        intro = content.intro,
        blog = text_section(&blog_heading, content.blog, blog_empty),
        teaching = text_section(&teaching_heading, content.teaching, teaching_empty),
        unsubscribe = content.unsubscribe_url,
    );

    Rendered {
        subject: content.subject.to_string(),
        html: frame(
            content.site_url,
            content.period_label.unwrap_or_default(),
            &body,
            content.unsubscribe_url,
        ),
        text,
    }
}
