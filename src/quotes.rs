//! Ayrton Senna quotes.

use axum::{Router, debug_handler, response::Html, routing::get};
use rand::seq::IndexedRandom;

use crate::{AppState, include_res, res::{self, escape, fill}};

pub const QUOTES: [&str; 7] = [
    "Racing, competing, it's in my blood. It's part of me, it's part of my life; I have been doing it all my life and it stands out above everything else.",
    "When you are fitted in a racing car and you race to win, second or third place is not enough.",
    "You will never know the feeling of a driver when winning a race. The helmet hides feelings that cannot be understood.",
    "If you have God on your side, everything becomes clear.",
    "You must take the compromise to win, or else nothing. That means: you race or you do not.",
    "I don't know driving in another way which isn't risky. Each one has to improve himself. Each driver has its limit. My limit is a little bit further than other's.",
    "Of course there are moments that you wonder how long you should be doing it because there are other aspects which are not nice, of this lifestyle. But I just love winning.",
];

pub const IMAGES: [&str; 6] = [
    "quotes/images/senna1.jpg",
    "quotes/images/senna2.jpg",
    "quotes/images/senna3.jpg",
    "quotes/images/senna4.jpg",
    "quotes/images/senna5.jpg",
    "quotes/images/senna6.jpg",
];

/// Where the static file server publishes an image path.
pub fn image_src(path: &str) -> String {
    format!("/static/{path}")
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quote))
        .route("/quote", get(quote))
        .route("/show_all", get(show_all))
        .route("/about", get(about))
}

#[debug_handler]
async fn quote() -> Html<String> {
    let mut rng = rand::rng();
    let quote = QUOTES.choose(&mut rng).copied().unwrap_or_default();
    let image_url = IMAGES.choose(&mut rng).copied().unwrap_or_default();

    res::page(
        "Ayrton Senna",
        &fill(
            include_res!(str, "/pages/quotes/quote.html"),
            &[("quote", escape(quote)), ("image_src", escape(&image_src(image_url)))],
        ),
    )
}

#[debug_handler]
async fn show_all() -> Html<String> {
    let quotes: String = QUOTES
        .iter()
        .map(|quote| format!("<li>{}</li>\n", escape(quote)))
        .collect();
    let images: String = IMAGES
        .iter()
        .map(|image| format!("<img src=\"{}\" alt=\"Ayrton Senna\" width=\"200\">\n", escape(&image_src(image))))
        .collect();

    res::page(
        "All quotes",
        &fill(
            include_res!(str, "/pages/quotes/show_all.html"),
            &[("quotes", quotes), ("images", images)],
        ),
    )
}

#[debug_handler]
async fn about() -> Html<String> {
    res::page("About", include_res!(str, "/pages/quotes/about.html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn both_pages_link_images_the_same_way() {
        let one = quote().await.0;
        assert!(one.contains(r#"src="/static/quotes/images/senna"#));

        let all = show_all().await.0;
        for image in IMAGES {
            assert!(all.contains(&format!(r#"src="{}""#, image_src(image))), "{image}");
        }
    }
}
