/// Diagnostic tool: calculator output, tiling and panel text for every slider
/// position, without opening a window.
use areascale::geometry::{ScalingState, SliderConfig};
use areascale::layout::{compute_page_layout, compute_tiling, AxisBounds};
use areascale::ui::panels::{self, format_factor, Panel, PagePanels};

fn print_panel(label: &str, panel: &Panel) {
    println!("    [{label}]");
    if let Some(title) = &panel.title {
        println!("      {title}");
    }
    for line in &panel.lines {
        println!("      {line}");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("areascale=debug".parse()?),
        )
        .init();

    let slider = SliderConfig::default();
    // Optional: restrict the report to one scale factor.
    let only = match std::env::args().nth(1) {
        Some(raw) => Some(slider.snap(raw.trim().parse::<f64>()?)),
        None => None,
    };

    println!("=== DIAGNOSTIC: Perimeter vs Area Scaling ===");
    println!("{}", panels::PAGE_TITLE);
    println!("{}", panels::PAGE_SUBTITLE);

    for s in slider.values() {
        if only.is_some_and(|o| o != s) {
            continue;
        }
        let state = ScalingState::compute(s);
        let bounds = AxisBounds::shared(&state);

        println!("\n[s = {}]", format_factor(s));
        println!(
            "    scaled {}x{}  perimeter {} -> {} (x{})  area {} -> {} (x{})",
            state.scaled_width,
            state.scaled_height,
            state.original_perimeter,
            state.scaled_perimeter,
            state.perimeter_multiplier,
            state.original_area,
            state.scaled_area,
            state.area_multiplier
        );
        println!(
            "    axes x [{}, {}]  y [{}, {}]",
            bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max
        );

        match compute_tiling(&state) {
            Some(tiling) => {
                println!(
                    "    tiling: {} copies ({}x{} grid)",
                    tiling.copies(),
                    tiling.factor,
                    tiling.factor
                );
                for cell in &tiling.cells {
                    println!(
                        "      #{:<2} row={} col={} at ({}, {})",
                        cell.index, cell.row, cell.col, cell.x, cell.y
                    );
                }
            }
            None => println!("    tiling: none (fractional scale factor)"),
        }

        let page_panels = PagePanels::build(&state);
        print_panel("original", &page_panels.original);
        print_panel("scaled", &page_panels.scaled);
        print_panel("discovery", &page_panels.discovery);
        if let Some(warning) = &page_panels.warning {
            print_panel("warning", warning);
        }
        for (i, panel) in page_panels.explanation.iter().enumerate() {
            print_panel(&format!("explanation {}", i + 1), panel);
        }

        let page = compute_page_layout(1280.0, 800.0, 0.0, &page_panels.content());
        println!(
            "    page at 1280x800: content height {:.0}px, max scroll {:.0}px",
            page.content_height, page.max_scroll
        );
    }

    Ok(())
}
