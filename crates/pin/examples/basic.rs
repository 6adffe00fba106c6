//! Load a page, query it, rewire some nodes and fire an event.
//!
//! Run with `cargo run -p pin --example basic`.

use pin::{Page, Value};

fn main() {
    tracing_subscriber::fmt::init();

    let page = Page::from_html(
        r#"<html><body>
            <ul id="menu">
                <li class="item">Home</li>
                <li class="item">Docs</li>
                <li class="item">About</li>
            </ul>
        </body></html>"#,
    );

    let items = page.query("#menu .item");
    println!("menu has {} items", items.len());

    // Mark the first item and give each one an index attribute.
    items.eq(0).set(".active", Some(Value::from("add")));
    items.set_with("@data-index", |i| Some(Value::from(i as i64)));
    println!("active items: {}", page.query(".active").len());

    // Grow the menu from a fragment.
    page.query("#menu").append("<li class='item'>Contact</li>");
    println!("after append: {}", page.query("#menu .item").len());

    // Namespaced events with bubbling.
    let menu = page.query("#menu");
    menu.on("select.nav", |event, args| {
        println!("menu saw select ({}) with args {:?}", event.name, args);
    });
    page.query("#menu .item")
        .eq(1)
        .trigger("select.nav", vec![Value::from("docs")]);

    // Unbind the whole namespace.
    menu.off(".nav");
    page.query("#menu .item").eq(1).trigger("select.nav", Vec::new());
    println!("done");
}
