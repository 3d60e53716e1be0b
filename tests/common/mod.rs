/// Twice the signed area of a-b-c, exact for `i64` input.
fn orient(a: [i64; 2], b: [i64; 2], c: [i64; 2]) -> i128 {
    (b[0] - a[0]) as i128 * (c[1] - a[1]) as i128 - (b[1] - a[1]) as i128 * (c[0] - a[0]) as i128
}

/// Whether one edge line of `t` has every corner of `u` on its outer side.
fn separated(t: &[[i64; 2]; 3], u: &[[i64; 2]; 3]) -> bool {
    let s = orient(t[0], t[1], t[2]).signum();
    (0..3).any(|k| {
        let (p, q) = (t[k], t[(k + 1) % 3]);
        u.iter().all(|&v| orient(p, q, v) * s <= 0)
    })
}

/// Asserts that no two non-degenerate triangles share interior points.
pub fn assert_no_overlap(ring: &[[i64; 2]], triangles: &[[u32; 3]]) {
    let corners: Vec<[[i64; 2]; 3]> = triangles
        .iter()
        .map(|&[a, b, c]| [ring[a as usize], ring[b as usize], ring[c as usize]])
        .filter(|t| orient(t[0], t[1], t[2]) != 0)
        .collect();
    for (i, t) in corners.iter().enumerate() {
        for u in &corners[i + 1..] {
            assert!(
                separated(t, u) || separated(u, t),
                "triangles {t:?} and {u:?} overlap"
            );
        }
    }
}
