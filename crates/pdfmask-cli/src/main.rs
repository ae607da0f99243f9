mod cli;
mod count_cmd;
mod elements_cmd;
mod images_cmd;
mod info_cmd;
mod mark_cmd;
mod mask_cmd;
mod page_range;
mod regions_cmd;
mod scale_cmd;
mod shared;
mod text_cmd;
mod word_source;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Info {
            ref file,
            ref pages,
            ref format,
        } => info_cmd::run(file, pages.as_ref(), format),
        Commands::Scale {
            image_size,
            ref page,
            tolerance,
            ref format,
        } => scale_cmd::run(image_size, page, tolerance, format),
        Commands::Regions {
            ref page,
            ref regions,
            ref format,
        } => regions_cmd::run(page, regions, format),
        Commands::Count {
            ref input,
            ref regions,
            page_size,
            ref label,
            threshold,
            ref pages,
            ref format,
            ref preview,
            preview_zoom,
        } => count_cmd::run(&count_cmd::CountRequest {
            input,
            regions,
            page_size,
            label: label.as_deref(),
            threshold,
            pages: pages.as_ref(),
            format,
            preview: preview.as_deref(),
            preview_zoom,
        }),
        Commands::Mask {
            ref file,
            ref regions,
            page,
            invert,
            outline,
            color,
            ref output,
        } => mask_cmd::run(&mask_cmd::MaskRequest {
            file,
            regions,
            page,
            invert,
            outline,
            color,
            output: output.as_deref(),
        }),
        Commands::Text {
            ref file,
            ref pages,
            layout,
            ref format,
        } => text_cmd::run(file, pages.as_ref(), layout, format),
        Commands::Images {
            ref file,
            ref pages,
            ref format,
            extract,
            ref output_dir,
        } => images_cmd::run(file, pages.as_ref(), format, extract, output_dir.as_deref()),
        Commands::Elements {
            ref file,
            ref pages,
            ref kinds,
            ref format,
            ref svg,
        } => elements_cmd::run(file, pages.as_ref(), kinds, format, svg.as_deref()),
        Commands::Mark {
            ref file,
            ref regions,
            page,
            color,
            line_width,
            ref output,
        } => mark_cmd::run(file, regions, page, color, line_width, output.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
