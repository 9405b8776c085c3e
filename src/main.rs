use circuitfx::prelude::*;

fn main() -> Result<(), RunError> {
    let links = vec![
        "projects/echo".to_string(),
        "projects/relay".to_string(),
        "projects/prism".to_string(),
        "projects/flux".to_string(),
        "projects/atlas".to_string(),
        "projects/ion".to_string(),
    ];

    Simulation::new()
        .with_scene(RadialScene::with_links(links))
        .with_title("circuitfx demo")
        .with_node_click(|node| {
            if let Some(link) = &node.link {
                eprintln!("open {link}");
            }
        })
        .run()
}
