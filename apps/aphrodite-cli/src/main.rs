use std::path::PathBuf;

use aphrodite_common::{CameraState, DemoConfig, Mesh, SceneKind, TransformUniforms};
use aphrodite_math::{EPSILON, Matrix4x4, Vector3, Vector4};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aphrodite-cli", about = "CLI tool for Aphrodite transforms and meshes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and layout constants
    Info,
    /// Build the camera matrices and optionally project a point
    Camera {
        /// Camera position as x,y,z
        #[arg(long, value_parser = parse_vector3, default_value = "0,0,0", allow_hyphen_values = true)]
        position: Vector3,
        /// Euler rotation in radians as x,y,z
        #[arg(long, value_parser = parse_vector3, default_value = "0,0,0", allow_hyphen_values = true)]
        rotation: Vector3,
        /// Vertical field of view in radians
        #[arg(long, default_value_t = std::f32::consts::FRAC_PI_2)]
        fovy: f32,
        #[arg(long, default_value_t = 16.0 / 9.0)]
        aspect: f32,
        #[arg(long, default_value_t = 1.0)]
        near: f32,
        /// Far plane; 0 collapses every depth to zero
        #[arg(long, default_value_t = 0.0)]
        far: f32,
        /// World-space point to project, as x,y,z
        #[arg(long, value_parser = parse_vector3, allow_hyphen_values = true)]
        point: Option<Vector3>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Describe a built-in mesh
    Mesh {
        kind: SceneKind,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the effective demo configuration as YAML
    Config {
        /// YAML file to load; defaults are printed when omitted
        path: Option<PathBuf>,
    },
}

fn parse_vector3(s: &str) -> Result<Vector3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got {s:?}"));
    };
    let parse = |c: &str| c.parse::<f32>().map_err(|e| format!("{c:?}: {e}"));
    Ok(Vector3::new(parse(*x)?, parse(*y)?, parse(*z)?))
}

#[derive(Debug, Serialize)]
struct Projection {
    clip: Vector4,
    /// `None` when the point projects onto `w = 0`.
    ndc: Option<Vector3>,
    in_front: bool,
}

#[derive(Debug, Serialize)]
struct CameraReport {
    camera: CameraState,
    aspect: f32,
    view: [f32; 16],
    projection: [f32; 16],
    view_projection: [f32; 16],
    #[serde(skip_serializing_if = "Option::is_none")]
    point: Option<Projection>,
}

fn project(view_projection: &Matrix4x4, point: Vector3) -> Projection {
    let clip = *view_projection * Vector4::point(point);
    let ndc = (clip.w != 0.0).then(|| Vector3::from(clip / clip.w));
    Projection {
        clip,
        ndc,
        in_front: clip.w > 0.0,
    }
}

fn camera_report(camera: CameraState, aspect: f32, point: Option<Vector3>) -> CameraReport {
    let view_projection = camera.view_projection(aspect);
    CameraReport {
        camera,
        aspect,
        view: camera.view().to_f32_array(),
        projection: camera.projection(aspect).to_f32_array(),
        view_projection: view_projection.to_f32_array(),
        point: point.map(|p| project(&view_projection, p)),
    }
}

#[derive(Debug, Serialize)]
struct MeshReport {
    kind: SceneKind,
    vertices: usize,
    indices: usize,
    triangles: usize,
    vertex_bytes: usize,
    index_bytes: usize,
    min: Vector3,
    max: Vector3,
}

fn mesh_report(kind: SceneKind, mesh: &Mesh) -> MeshReport {
    let positions = mesh.vertices.iter().map(|v| Vector3::from(v.position));
    let (min, max) = positions.fold(
        (Vector3::from([f32::INFINITY; 3]), Vector3::from([f32::NEG_INFINITY; 3])),
        |(lo, hi), p| {
            (
                Vector3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vector3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        },
    );
    MeshReport {
        kind,
        vertices: mesh.vertices.len(),
        indices: mesh.indices.len(),
        triangles: mesh.indices.len() / 3,
        vertex_bytes: mesh.vertex_bytes().len(),
        index_bytes: mesh.index_bytes().len(),
        min,
        max,
    }
}

fn print_camera(report: &CameraReport) {
    let c = &report.camera;
    println!(
        "camera: position={} rotation={} fovy={} aspect={} near={} far={}",
        c.position, c.rotation, c.fovy, report.aspect, c.near, c.far
    );
    println!("\nview:\n{}", c.view());
    println!("\nprojection:\n{}", c.projection(report.aspect));
    println!("\nview_projection:\n{}", c.view_projection(report.aspect));
    if let Some(p) = &report.point {
        println!("\nclip: {}", p.clip);
        match p.ndc {
            Some(ndc) => println!("ndc:  {ndc}"),
            None => println!("ndc:  undefined (w = 0)"),
        }
        println!("in front of camera: {}", p.in_front);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("aphrodite-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("math: f32 components, epsilon={EPSILON:e}");
            println!("matrix: column-major, {} bytes", Matrix4x4::BYTE_LEN);
            println!(
                "uniforms: {} bytes, pvm@{} multiplier@{}",
                TransformUniforms::SIZE,
                TransformUniforms::PVM_OFFSET,
                TransformUniforms::MULTIPLIER_OFFSET
            );
            let scenes: Vec<_> = SceneKind::ALL.iter().map(|k| k.name()).collect();
            println!("scenes: {}", scenes.join(", "));
        }
        Commands::Camera {
            position,
            rotation,
            fovy,
            aspect,
            near,
            far,
            point,
            json,
        } => {
            let camera = CameraState {
                position,
                rotation,
                fovy,
                near,
                far,
            };
            tracing::debug!(?camera, aspect, "building camera matrices");
            let report = camera_report(camera, aspect, point);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_camera(&report);
            }
        }
        Commands::Mesh { kind, json } => {
            let report = mesh_report(kind, &kind.mesh());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("mesh: {}", report.kind);
                println!("vertices: {} ({} bytes)", report.vertices, report.vertex_bytes);
                println!(
                    "indices: {} ({} bytes, {} triangles)",
                    report.indices, report.index_bytes, report.triangles
                );
                println!("bounds: {} .. {}", report.min, report.max);
            }
        }
        Commands::Config { path } => {
            let config = match path {
                Some(path) => DemoConfig::load(&path)?,
                None => DemoConfig::default(),
            };
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vector3("1,2,3").unwrap(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            parse_vector3(" -0.5, 0 ,4e1").unwrap(),
            Vector3::new(-0.5, 0.0, 40.0)
        );
        assert!(parse_vector3("1,2").is_err());
        assert!(parse_vector3("1,2,3,4").is_err());
        assert!(parse_vector3("a,b,c").is_err());
    }

    #[test]
    fn cli_accepts_negative_vectors() {
        let cli = Cli::try_parse_from([
            "aphrodite-cli",
            "camera",
            "--position",
            "-1,2,-3",
            "--point",
            "0,0,-5",
            "--json",
        ])
        .unwrap();
        let Commands::Camera { position, point, json, .. } = cli.command else {
            panic!("expected camera command");
        };
        assert_eq!(position, Vector3::new(-1.0, 2.0, -3.0));
        assert_eq!(point, Some(Vector3::new(0.0, 0.0, -5.0)));
        assert!(json);
    }

    #[test]
    fn point_ahead_projects_to_screen_center() {
        let camera = CameraState::default();
        let report = camera_report(camera, 1.0, Some(Vector3::new(0.0, 0.0, -5.0)));
        let p = report.point.unwrap();
        assert!(p.in_front);
        assert!(p.clip.is_equal(Vector4::new(0.0, 0.0, 0.0, 5.0), 1e-6));
        assert!(p.ndc.unwrap().approx_eq(Vector3::ZERO));
    }

    #[test]
    fn point_on_camera_plane_has_no_ndc() {
        let report = camera_report(CameraState::default(), 1.0, Some(Vector3::new(1.0, 0.0, 0.0)));
        let p = report.point.unwrap();
        assert_eq!(p.clip.w, 0.0);
        assert!(p.ndc.is_none());
        assert!(!p.in_front);
    }

    #[test]
    fn report_matrices_are_column_major() {
        let camera = CameraState {
            position: Vector3::new(1.0, 2.0, 3.0),
            ..CameraState::default()
        };
        let report = camera_report(camera, 1.0, None);
        assert_eq!(&report.view[12..15], &[-1.0, -2.0, -3.0]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("point").is_none());
        assert_eq!(json["view"].as_array().unwrap().len(), 16);
    }

    #[test]
    fn cube_report() {
        let report = mesh_report(SceneKind::Cube, &Mesh::cube());
        assert_eq!(report.vertices, 24);
        assert_eq!(report.triangles, 12);
        assert_eq!(report.vertex_bytes, 768);
        assert_eq!(report.index_bytes, 144);
        assert_eq!(report.min, Vector3::new(-0.5, -0.5, -0.5));
        assert_eq!(report.max, Vector3::new(0.5, 0.5, 0.5));
    }
}
