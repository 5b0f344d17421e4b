use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use datepicker_widget::{
    DatePicker, RenderEnv, WidgetError,
    libs::{
        dropdown::{RawDropdownEntry, RawDropdownItem},
        markup::{BoundModel, Size},
    },
};

pub mod api;

// 演示页面依赖的前端资源，顺序即加载顺序
const STYLESHEETS: &[&str] = &[
    "https://cdn.jsdelivr.net/npm/bootstrap@3.4.1/dist/css/bootstrap.min.css",
    "https://cdn.jsdelivr.net/npm/eonasdan-bootstrap-datetimepicker@4.17.49/build/css/bootstrap-datetimepicker.min.css",
];
const SCRIPTS: &[&str] = &[
    "https://cdn.jsdelivr.net/npm/jquery@1.12.4/dist/jquery.min.js",
    "https://cdn.jsdelivr.net/npm/moment@2.29.4/min/moment-with-locales.min.js",
    "https://cdn.jsdelivr.net/npm/bootstrap@3.4.1/dist/js/bootstrap.min.js",
    "https://cdn.jsdelivr.net/npm/eonasdan-bootstrap-datetimepicker@4.17.49/build/js/bootstrap-datetimepicker.min.js",
];

fn quick_pick(label: &str, date: Option<NaiveDate>) -> Option<RawDropdownItem> {
    let date = date?;
    Some(
        RawDropdownEntry::new(label)
            .url("#")
            .value(date.format("%Y-%m-%d").to_string())
            .into(),
    )
}

/// Widgets shown on the demo page, with a heading each.
pub fn demo_widgets(today: NaiveDate) -> Vec<(&'static str, DatePicker)> {
    let mut quick = DatePicker::standalone("deadline")
        .placeholder("YYYY-MM-DD")
        .client_option("format", "YYYY-MM-DD")
        .dropdown_item(RawDropdownEntry::new("Quick picks"));
    quick.dropdown_items.extend(
        [
            quick_pick("Yesterday", today.pred_opt()),
            quick_pick("Today", Some(today)),
            quick_pick("Tomorrow", today.succ_opt()),
        ]
        .into_iter()
        .flatten(),
    );
    quick = quick.dropdown_item(RawDropdownItem::Markup("-".into()));
    quick = quick.dropdown_item(
        RawDropdownEntry::new("Release day")
            .url("#")
            .value("2025-12-24"),
    );

    vec![
        (
            "Plain input",
            DatePicker::standalone("plain")
                .addon(None)
                .placeholder("Click to pick a date"),
        ),
        ("Quick-select dropdown", quick),
        (
            "Bound to a model, read-only, Russian",
            DatePicker::bound(BoundModel::new("Event", "starts_at").with_value("2025-03-08 10:00"))
                .language("ru")
                .readonly(true)
                .size(Size::Sm)
                .client_option("format", "YYYY-MM-DD HH:mm"),
        ),
        (
            "Client events",
            DatePicker::standalone("logged")
                .on("dp.change", "function (e) { console.log('changed', e.date); }")
                .on("dp.show", "function () { console.log('shown'); }"),
        ),
    ]
}

pub fn demo_page(env: &RenderEnv, today: NaiveDate) -> Result<String, WidgetError> {
    let mut body = String::new();
    let mut scripts = Vec::new();
    for (title, widget) in demo_widgets(today) {
        let rendered = widget.render(env)?;
        body.push_str(&format!(
            "<div class=\"form-group\">\n<label for=\"{}\">{}</label>\n{}\n</div>\n",
            rendered.id, title, rendered.html
        ));
        scripts.extend(rendered.script);
    }

    let head: String = STYLESHEETS
        .iter()
        .map(|href| format!("<link rel=\"stylesheet\" href=\"{href}\">\n"))
        .collect();
    let assets: String = SCRIPTS
        .iter()
        .map(|src| format!("<script src=\"{src}\"></script>\n"))
        .collect();

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Date picker demo</title>\n{head}</head>\n<body>\n<div class=\"container\" style=\"max-width: 480px; margin-top: 40px;\">\n{body}</div>\n{assets}{}\n</body>\n</html>\n",
        datepicker_widget::libs::script::script_block(&scripts)
    ))
}

pub async fn serve_demo(env: web::Data<RenderEnv>) -> impl Responder {
    match demo_page(&env, Local::now().date_naive()) {
        Ok(page) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(page),
        Err(e) => {
            tracing::error!("Failed to render demo page: {:?}", e);
            HttpResponse::InternalServerError().body(format!("Failed to render demo page: {}", e))
        }
    }
}
