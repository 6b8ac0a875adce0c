use askama::Template;
use askama_web::WebTemplate;

pub struct RouteHelp {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "help.html")]
pub struct HelpTemplate {
    pub routes: &'static [RouteHelp],
}
