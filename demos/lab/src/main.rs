use argh::FromArgs;
use std::path::PathBuf;
use std::str::FromStr;

use binmorph::image::{grid_image, BinaryImage, ImageSize};
use binmorph::morphology::{
    self as morph, Connectivity, ExecutionStrategy, ReconstructionMode, ReconstructionParams,
    SkeletonParams, StructuringElement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Boundary,
    Fill,
    Hull,
    Skeleton,
    Reconstruct,
    All,
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boundary" => Ok(Operator::Boundary),
            "fill" => Ok(Operator::Fill),
            "hull" => Ok(Operator::Hull),
            "skeleton" => Ok(Operator::Skeleton),
            "reconstruct" => Ok(Operator::Reconstruct),
            "all" => Ok(Operator::All),
            _ => Err(format!("unknown operator: {}", s)),
        }
    }
}

impl Operator {
    fn runs(&self, other: Operator) -> bool {
        *self == Operator::All || *self == other
    }
}

fn parse_connectivity(value: &str) -> Result<Connectivity, String> {
    match value {
        "4" => Ok(Connectivity::Four),
        "8" => Ok(Connectivity::Eight),
        _ => Err(format!("connectivity must be 4 or 8, got {}", value)),
    }
}

#[derive(FromArgs)]
/// Run the binary morphology operators on a generated grid or a text image and print
/// the results
struct Args {
    /// operator to run: boundary, fill, hull, skeleton, reconstruct or all
    #[argh(option, short = 'o', default = "Operator::All")]
    operator: Operator,

    /// path to a text image using '#' for foreground and '.' for background
    #[argh(option, short = 'i')]
    image_path: Option<PathBuf>,

    /// number of rows of the generated grid
    #[argh(option, default = "16")]
    rows: usize,

    /// number of columns of the generated grid
    #[argh(option, default = "16")]
    cols: usize,

    /// side of the checkerboard blocks of the generated grid
    #[argh(option, default = "4")]
    block_size: usize,

    /// foreground connectivity, 4 or 8
    #[argh(
        option,
        default = "Connectivity::Eight",
        from_str_fn(parse_connectivity)
    )]
    connectivity: Connectivity,

    /// radius of the disk used to build the reconstruction markers
    #[argh(option, default = "1")]
    radius: usize,

    /// stop the iterative operators after this many steps
    #[argh(option)]
    max_iterations: Option<usize>,

    /// run on a local pool of this many threads instead of the global one
    #[argh(option)]
    threads: Option<usize>,
}

fn print_image(title: &str, image: &BinaryImage) {
    println!(
        "{} ({} foreground pixels)\n{}\n",
        title,
        image.count_foreground(),
        image
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let image = match &args.image_path {
        Some(path) => std::fs::read_to_string(path)?.parse::<BinaryImage>()?,
        None => grid_image(
            ImageSize {
                width: args.cols,
                height: args.rows,
            },
            args.block_size,
        )?,
    };
    print_image("original", &image);
    log::info!(
        "{} components, {} holes",
        morph::count_components(&image, args.connectivity),
        morph::count_holes(&image, args.connectivity)
    );

    let element = StructuringElement::default();
    let strategy = match args.threads {
        Some(n) => ExecutionStrategy::Fixed(n),
        None => ExecutionStrategy::ParallelRows,
    };

    if args.operator.runs(Operator::Boundary) {
        print_image("eroded", &morph::erode(&image, &element)?);
        print_image("boundary", &morph::boundary(&image, &element)?);
    }

    if args.operator.runs(Operator::Fill) {
        print_image("filled", &morph::fill_holes(&image, args.connectivity));
    }

    if args.operator.runs(Operator::Hull) {
        let vertices = morph::convex_hull_vertices(&image);
        log::info!("convex hull vertices: {:?}", vertices);
        print_image("convex hull", &morph::convex_hull_with(&image, strategy)?);
    }

    if args.operator.runs(Operator::Skeleton) {
        let params = SkeletonParams {
            max_passes: args.max_iterations,
            strategy,
        };
        let result = morph::skeletonize_with(&image, &params)?;
        print_image(
            &format!(
                "skeleton after {} passes (converged: {})",
                result.num_passes, result.converged
            ),
            &result.image,
        );
    }

    if args.operator.runs(Operator::Reconstruct) {
        let disk = StructuringElement::disk(args.radius);
        let params = ReconstructionParams {
            max_iterations: args.max_iterations,
            strategy,
            ..Default::default()
        };

        let markers = [
            (ReconstructionMode::Dilation, morph::erode(&image, &disk)?),
            (ReconstructionMode::Erosion, morph::dilate(&image, &disk)?),
        ];
        for (mode, marker) in markers {
            let result = morph::reconstruct_with(&marker, &image, mode, &params)?;
            print_image(&format!("marker for {}", mode), &marker);
            print_image(
                &format!(
                    "reconstruction by {} after {} iterations (converged: {})",
                    mode, result.num_iterations, result.converged
                ),
                &result.image,
            );
        }
    }

    Ok(())
}
