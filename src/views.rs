use maud::{html, Markup, DOCTYPE};

use crate::utils;

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li {
                        a href="/" {
                            strong { "Gubuk Trainer" }
                        }
                    }
                }
                ul {
                    li { (utils::VERSION) }
                }
            }
        }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            title { (format!("{title} - Gubuk Trainer")) }
        }

        body {
            (header())
            main { (body) }
        }
    }
}
