//! Renders distance fields as ASCII shading.
//!
//! Run with: cargo run --example ascii_field

use exactum::{DistanceTransform, NearestTransform, Rect, signed_field};

const WIDTH: i32 = 64;
const HEIGHT: i32 = 28;

const RAMP: &[u8] = b"@%#*+=-:. ";

fn shade(value: f64, max: f64) -> char {
    let t = (value / max).clamp(0.0, 1.0);
    let idx = (t * (RAMP.len() - 1) as f64).round() as usize;
    RAMP[idx] as char
}

fn render_scatter() {
    let rect = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut edt = DistanceTransform::new(rect).unwrap();

    // A few hand-placed seed points.
    let seeds = [(5, 5), (40, 8), (20, 22), (58, 24), (33, 3)];
    edt.initialize_membership(|x, y| seeds.contains(&(x, y)));
    edt.transform();

    let max: f64 = (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .map(|(x, y)| edt.distance::<f64>(x, y))
        .fold(0.0, f64::max);

    println!("Distance to the nearest of {} seed points:", seeds.len());
    for y in 0..HEIGHT {
        let line: String = (0..WIDTH)
            .map(|x| shade(edt.distance(x, y), max))
            .collect();
        println!("{line}");
    }
}

fn render_voronoi() {
    let rect = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut nearest = NearestTransform::new(rect).unwrap();

    let seeds = [(5, 5), (40, 8), (20, 22), (58, 24), (33, 3)];
    nearest.initialize_membership(|x, y| seeds.contains(&(x, y)));
    assert!(nearest.transform());

    println!("\nVoronoi regions (each cell labelled by its nearest seed):");
    for y in 0..HEIGHT {
        let line: String = (0..WIDTH)
            .map(|x| {
                let c = nearest.nearest(x, y);
                let owner = seeds
                    .iter()
                    .position(|&(sx, sy)| (sx, sy) == (c.x as i32, c.y as i32))
                    .unwrap();
                char::from(b'A' + owner as u8)
            })
            .collect();
        println!("{line}");
    }
}

fn render_signed_disk() {
    let rect = Rect::new(0, 0, WIDTH, HEIGHT);
    let (cx, cy, r) = (32.0, 14.0, 10.0);
    let field = signed_field::<f64, _>(rect, |x, y| {
        // Squash x so the disk looks round in terminal cells.
        let dx = (x as f64 - cx) * 0.5;
        let dy = y as f64 - cy;
        dx * dx + dy * dy <= r * r * 0.25
    })
    .unwrap();

    println!("\nSigned field of a disk ('o' inside, shading outside):");
    for y in 0..HEIGHT {
        let line: String = (0..WIDTH)
            .map(|x| {
                let d = field.get(x, y);
                if d < 0.0 { 'o' } else { shade(d, 20.0) }
            })
            .collect();
        println!("{line}");
    }
}

fn main() {
    render_scatter();
    render_voronoi();
    render_signed_disk();
}
