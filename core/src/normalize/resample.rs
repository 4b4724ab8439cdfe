use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

/// Resizes a volume to the target shape with trilinear interpolation
///
/// Interpolation is a convex combination of source voxels, so the value
/// range of the input is preserved. When `antialias` is set, axes being
/// downscaled are prefiltered with a Gaussian before sampling, matching
/// the sigma choice `(scale - 1) / 2` of standard anti-aliased resizing.
pub fn resize3d(
    input: ArrayView3<f32>,
    target: (usize, usize, usize),
    antialias: bool,
) -> Array3<f32> {
    let (sd, sh, sw) = input.dim();
    let (td, th, tw) = target;

    if (sd, sh, sw) == target {
        return input.to_owned();
    }

    let smoothed = if antialias {
        let sigma = [
            antialias_sigma(sd, td),
            antialias_sigma(sh, th),
            antialias_sigma(sw, tw),
        ];
        if sigma.iter().any(|&s| s > 0.0) {
            Some(smooth3d(input, sigma))
        } else {
            None
        }
    } else {
        None
    };
    let src = match smoothed.as_ref() {
        Some(a) => a.view(),
        None => input.reborrow(),
    };

    let zc = lerp_coords(sd, td);
    let yc = lerp_coords(sh, th);
    let xc = lerp_coords(sw, tw);

    Array3::from_shape_fn((td, th, tw), |(z, y, x)| {
        let (z0, z1, fz) = zc[z];
        let (y0, y1, fy) = yc[y];
        let (x0, x1, fx) = xc[x];

        let c000 = src[[z0, y0, x0]];
        let c001 = src[[z0, y0, x1]];
        let c010 = src[[z0, y1, x0]];
        let c011 = src[[z0, y1, x1]];
        let c100 = src[[z1, y0, x0]];
        let c101 = src[[z1, y0, x1]];
        let c110 = src[[z1, y1, x0]];
        let c111 = src[[z1, y1, x1]];

        let c00 = c000 + (c001 - c000) * fx;
        let c01 = c010 + (c011 - c010) * fx;
        let c10 = c100 + (c101 - c100) * fx;
        let c11 = c110 + (c111 - c110) * fx;

        let c0 = c00 + (c01 - c00) * fy;
        let c1 = c10 + (c11 - c10) * fy;

        c0 + (c1 - c0) * fz
    })
}

/// Resizes a 2D image to the target shape with bilinear interpolation
pub fn resize2d(input: ArrayView2<f32>, target: (usize, usize)) -> Array2<f32> {
    let (sh, sw) = input.dim();
    let (th, tw) = target;

    if (sh, sw) == target {
        return input.to_owned();
    }

    let yc = lerp_coords(sh, th);
    let xc = lerp_coords(sw, tw);

    Array2::from_shape_fn((th, tw), |(y, x)| {
        let (y0, y1, fy) = yc[y];
        let (x0, x1, fx) = xc[x];

        let c00 = input[[y0, x0]];
        let c01 = input[[y0, x1]];
        let c10 = input[[y1, x0]];
        let c11 = input[[y1, x1]];

        let c0 = c00 + (c01 - c00) * fx;
        let c1 = c10 + (c11 - c10) * fx;

        c0 + (c1 - c0) * fy
    })
}

/// Per-axis source coordinates for interpolation
///
/// Output index `i` samples source coordinate `(i + 0.5) * scale - 0.5`,
/// clamped to the valid range; returns `(floor, ceil, fraction)` triples.
fn lerp_coords(src: usize, dst: usize) -> Vec<(usize, usize, f32)> {
    let scale = src as f32 / dst as f32;
    (0..dst)
        .map(|i| {
            let c = ((i as f32 + 0.5) * scale - 0.5).clamp(0.0, (src - 1) as f32);
            let i0 = c.floor() as usize;
            let i1 = (i0 + 1).min(src - 1);
            (i0, i1, c - i0 as f32)
        })
        .collect()
}

/// Gaussian prefilter sigma for downscaling an axis, zero when upscaling
fn antialias_sigma(src: usize, dst: usize) -> f32 {
    if src <= dst {
        0.0
    } else {
        (src as f32 / dst as f32 - 1.0) / 2.0
    }
}

/// Separable Gaussian smoothing with per-axis sigmas
fn smooth3d(input: ArrayView3<f32>, sigma: [f32; 3]) -> Array3<f32> {
    let mut data = input.to_owned();
    for (axis, &s) in sigma.iter().enumerate() {
        if s > 0.0 {
            smooth_axis(&mut data, Axis(axis), s);
        }
    }
    data
}

/// Convolves every lane along `axis` with a normalized Gaussian kernel
///
/// Borders are handled by clamping indices, so the result stays a convex
/// combination of input values.
fn smooth_axis(data: &mut Array3<f32>, axis: Axis, sigma: f32) {
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;

    for mut lane in data.lanes_mut(axis) {
        let src: Vec<f32> = lane.iter().copied().collect();
        let n = src.len() as isize;
        for (i, out) in lane.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let j = (i as isize + k as isize - radius).clamp(0, n - 1) as usize;
                acc += src[j] * w;
            }
            *out = acc;
        }
    }
}

/// Normalized Gaussian kernel truncated at four sigma
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (4.0 * sigma).ceil().max(1.0) as usize;
    let mut kernel: Vec<f32> = (0..=2 * radius)
        .map(|k| {
            let x = k as f32 - radius as f32;
            (-0.5 * (x / sigma).powi(2)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}
