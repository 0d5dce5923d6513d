//! HTML page composition.
//!
//! Every render produces a complete document for the current route:
//!
//! ```text
//! div.container
//! ├── div.header    logo + nav list (current route marked `selected`)
//! ├── div.main
//! │   ├── div.content   h1 route name + the route's view
//! │   └── div.sidebar   user comments, comment input, like/dislike buttons
//! └── div.footer
//! ```
//!
//! ## Views
//!
//! - **Home / About / Contact**: embedded markdown from `static/pages/`,
//!   converted with pulldown-cmark.
//! - **Posts**: the post browser's current state (loading, error, paginated
//!   listing, or a single post with comments).
//! - **Not found**: a short message with a link home.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! every interpolated post title, comment, and draft is escaped.

use crate::browser::{BrowserState, Listing, Load, PostBrowser, PostPage, Viewing};
use crate::router::{Route, ViewTag};
use crate::widgets::{CommentBox, Polarity};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS: &str = include_str!("../static/style.css");
const HOME_MD: &str = include_str!("../static/pages/home.md");
const ABOUT_MD: &str = include_str!("../static/pages/about.md");
const CONTACT_MD: &str = include_str!("../static/pages/contact.md");

/// Everything a render reads. Built fresh by the shell for each render.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Document title, already formatted as `"<route> - <app>"`.
    pub title: &'a str,
    pub app_title: &'a str,
    pub footer: &'a str,
    pub route: &'a Route,
    /// Routes listed in the nav.
    pub routes: &'a [Route],
    /// Mounted post browser; `Some` only on the Posts route.
    pub browser: Option<&'a PostBrowser>,
    pub comment_box: &'a CommentBox,
    pub counters: [(Polarity, u64); 2],
}

/// Render the full page.
pub fn render_page(ctx: &PageContext<'_>) -> Markup {
    let content = html! {
        div.container {
            (render_header(ctx.app_title, ctx.routes, ctx.route))
            div.main {
                div.content {
                    h1 { (ctx.route.name) }
                    div.contentItem {
                        (render_view(ctx.route, ctx.browser))
                    }
                }
                (render_sidebar(ctx.comment_box, &ctx.counters))
            }
            div.footer { (ctx.footer) }
        }
    };
    base_document(ctx.title, content)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn render_header(app_title: &str, routes: &[Route], current: &Route) -> Markup {
    html! {
        div.header {
            a.logo href="#/" { (app_title) }
            (render_nav(routes, current))
        }
    }
}

/// Renders the navigation list, marking the current route.
pub fn render_nav(routes: &[Route], current: &Route) -> Markup {
    html! {
        ul.nav {
            @for route in routes {
                @let selected = route.url_fragment == current.url_fragment;
                li {
                    a href=(route.url_fragment) class=(if selected { "selected" } else { "" }) {
                        (route.name)
                    }
                }
            }
        }
    }
}

fn render_sidebar(comment_box: &CommentBox, counters: &[(Polarity, u64)]) -> Markup {
    html! {
        div.sidebar {
            div.comments {
                div.userComments {
                    h5 { "Kullanıcı Yorumları" }
                    ul {
                        @for comment in comment_box.comments() {
                            li { (comment) }
                        }
                    }
                }
                form {
                    input type="text" placeholder="Yorumunuzu yazınız." value=(comment_box.draft());
                }
            }
            div.widget {
                @for (polarity, count) in counters {
                    button class=(polarity.css_class()) aria-label=(polarity.label()) {
                        span.animation {}
                        (count)
                    }
                }
            }
        }
    }
}

fn markdown(source: &str) -> Markup {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(source));
    PreEscaped(out)
}

// ============================================================================
// Views
// ============================================================================

/// Renders the view selected by `route`.
pub fn render_view(route: &Route, browser: Option<&PostBrowser>) -> Markup {
    match route.view {
        ViewTag::Home => markdown(HOME_MD),
        ViewTag::About => markdown(ABOUT_MD),
        ViewTag::Contact => markdown(CONTACT_MD),
        ViewTag::NotFound => html! {
            p { "Page not found. " a href="#/" { "return home" } }
        },
        ViewTag::Posts => match browser {
            Some(browser) => render_posts(browser),
            None => html! { p { "Loading..." } },
        },
    }
}

fn render_posts(browser: &PostBrowser) -> Markup {
    match browser.state() {
        BrowserState::Listing(listing) => render_listing(listing),
        BrowserState::Viewing(viewing) => render_detail(viewing),
    }
}

fn render_listing(listing: &Listing) -> Markup {
    let pages = match listing.load() {
        Load::Loading => return html! { p { "Loading..." } },
        Load::Failed => return html! { p { "Error loading posts!" } },
        Load::Ready(pages) => pages,
    };

    html! {
        div {
            div.postItems {
                @for post in pages.current_items() {
                    h3 {
                        (post.title) " "
                        a href={ "#/posts/" (post.id) } data-post-id=(post.id) {
                            p { "Click Me" }
                        }
                    }
                }
            }
            div.pagination {
                button data-page=(pages.page_index().saturating_sub(1)) disabled[!pages.has_previous()] {
                    "Former"
                }
                span { "Page " (pages.page_index()) " of " (pages.total_pages()) }
                button data-page=(pages.page_index() + 1) disabled[!pages.has_next()] {
                    " Next"
                }
            }
        }
    }
}

fn render_detail(viewing: &Viewing) -> Markup {
    match viewing.load() {
        Load::Loading => html! { p { "Loading..." } },
        Load::Failed => html! { p { "Error loading post!" } },
        Load::Ready(page) => render_post_page(page),
    }
}

fn render_post_page(page: &PostPage) -> Markup {
    html! {
        h3 { (page.post.title) }
        p { (page.post.body) }
        h4 { "Comments" }
        @for comment in &page.comments {
            p data-comment-id=(comment.id) {
                strong { (comment.author) } ": " (comment.body)
            }
        }
        p { a href="#" data-action="back" { "Back" } }
    }
}

// ============================================================================
// Tests
// ============================================================================
