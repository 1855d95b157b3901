//! Chained 4x4 matrix composition with a pre-allocated operation buffer.

use std::f32::consts::PI;

/// 4x4 transformation matrix (column-major, like OpenGL/WebGL).
///
/// The matrix owns two 16-float buffers: `data`, the composed transform,
/// and `op`, a private scratch buffer each chained operation stages its
/// matrix in before multiplying it into `data`. Chains therefore run
/// without any per-call allocation:
///
/// ```
/// use sprite_m4::Mat4;
///
/// let mut m = Mat4::new();
/// m.identity()
///     .translate(4.0, 2.0, 0.0)
///     .rotate(0.0, 0.0, 1.0, std::f32::consts::FRAC_PI_2);
/// ```
///
/// Every operation computes `data = data * op`, i.e. the newest operation
/// is expressed in the local frame established by the operations chained
/// before it. `identity().scale(s).translate(t)` applied to a point scales
/// the translation as well; reversing that order silently changes where a
/// sprite lands, so callers must keep their chains in composition order.
///
/// A `Mat4` has a single owner and is mutated sequentially; reentrant use
/// of one instance from two logical threads of control corrupts the
/// scratch buffer.
#[derive(Debug, Clone)]
pub struct Mat4 {
    /// Composed transform in column-major order (index `4 * col + row`)
    data: [f32; 16],
    /// Staging buffer for the next operation matrix
    op: [f32; 16],
}

impl Mat4 {
    /// Create a new matrix initialized to the identity transform.
    pub fn new() -> Self {
        let mut m = Self {
            data: [0.0; 16],
            op: [0.0; 16],
        };
        m.identity();
        m
    }

    /// Reset to the multiplicative identity, discarding any composed chain.
    pub fn identity(&mut self) -> &mut Self {
        self.data = [
            1.0, 0.0, 0.0, 0.0, // Column 0
            0.0, 1.0, 0.0, 0.0, // Column 1
            0.0, 0.0, 1.0, 0.0, // Column 2
            0.0, 0.0, 0.0, 1.0, // Column 3
        ];
        self
    }

    /// Replace the matrix with a right-handed perspective projection.
    ///
    /// Unlike the chained operations this does not compose: whatever was
    /// built up so far is overwritten. `fov` is the vertical field of view
    /// in radians. `near` and `far` must be positive and distinct;
    /// `near == far` makes the divisor degenerate and the resulting
    /// infinities propagate silently, matching the thin-math contract of
    /// this type (no internal validation).
    pub fn perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) -> &mut Self {
        let f = (0.5 * (PI - fov)).tan();

        self.data = [
            f / aspect,
            0.0,
            0.0,
            0.0, // Column 0
            0.0,
            f,
            0.0,
            0.0, // Column 1
            0.0,
            0.0,
            (near + far) / (near - far),
            -1.0, // Column 2
            0.0,
            0.0,
            (2.0 * near * far) / (near - far),
            0.0, // Column 3
        ];

        self
    }

    /// Right-multiply by a rotation about the given axis.
    ///
    /// The axis must be a unit vector. The engine does not normalize it: a
    /// non-unit axis composes the rotation with a scale, which is almost
    /// never what a caller wants. A positive angle rotates counter-clockwise
    /// when viewed from the positive axis direction looking toward the
    /// origin (right-hand rule).
    pub fn rotate(&mut self, x: f32, y: f32, z: f32, radians: f32) -> &mut Self {
        let c = radians.cos();
        let s = radians.sin();
        let t = 1.0 - c;

        self.op = [
            x * x * t + c,
            x * y * t + z * s,
            x * z * t - y * s,
            0.0, // Column 0
            x * y * t - z * s,
            y * y * t + c,
            y * z * t + x * s,
            0.0, // Column 1
            x * z * t + y * s,
            y * z * t - x * s,
            z * z * t + c,
            0.0, // Column 2
            0.0,
            0.0,
            0.0,
            1.0, // Column 3
        ];

        self.compose()
    }

    /// Right-multiply by a non-uniform scale.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.op = [
            sx, 0.0, 0.0, 0.0, // Column 0
            0.0, sy, 0.0, 0.0, // Column 1
            0.0, 0.0, sz, 0.0, // Column 2
            0.0, 0.0, 0.0, 1.0, // Column 3
        ];

        self.compose()
    }

    /// Right-multiply by a translation.
    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) -> &mut Self {
        self.op = [
            1.0, 0.0, 0.0, 0.0, // Column 0
            0.0, 1.0, 0.0, 0.0, // Column 1
            0.0, 0.0, 1.0, 0.0, // Column 2
            tx, ty, tz, 1.0, // Column 3
        ];

        self.compose()
    }

    /// Right-multiply by an arbitrary column-major matrix.
    pub fn multiply(&mut self, rhs: &[f32; 16]) -> &mut Self {
        self.op = *rhs;
        self.compose()
    }

    /// Project a homogeneous point through the composed transform.
    ///
    /// Pure read: neither the matrix nor the scratch buffer is touched.
    pub fn apply(&self, p: [f32; 4]) -> [f32; 4] {
        let m = &self.data;
        [
            m[0] * p[0] + m[4] * p[1] + m[8] * p[2] + m[12] * p[3],
            m[1] * p[0] + m[5] * p[1] + m[9] * p[2] + m[13] * p[3],
            m[2] * p[0] + m[6] * p[1] + m[10] * p[2] + m[14] * p[3],
            m[3] * p[0] + m[7] * p[1] + m[11] * p[2] + m[15] * p[3],
        ]
    }

    /// Get matrix as flat array for GPU upload
    pub fn as_array(&self) -> &[f32; 16] {
        &self.data
    }

    /// `data = data * op`, fully unrolled.
    fn compose(&mut self) -> &mut Self {
        let a = &self.data;
        let b = &self.op;

        let a00 = a[0];
        let a01 = a[1];
        let a02 = a[2];
        let a03 = a[3];
        let a10 = a[4];
        let a11 = a[5];
        let a12 = a[6];
        let a13 = a[7];
        let a20 = a[8];
        let a21 = a[9];
        let a22 = a[10];
        let a23 = a[11];
        let a30 = a[12];
        let a31 = a[13];
        let a32 = a[14];
        let a33 = a[15];

        let b00 = b[0];
        let b01 = b[1];
        let b02 = b[2];
        let b03 = b[3];
        let b10 = b[4];
        let b11 = b[5];
        let b12 = b[6];
        let b13 = b[7];
        let b20 = b[8];
        let b21 = b[9];
        let b22 = b[10];
        let b23 = b[11];
        let b30 = b[12];
        let b31 = b[13];
        let b32 = b[14];
        let b33 = b[15];

        self.data = [
            b00 * a00 + b01 * a10 + b02 * a20 + b03 * a30,
            b00 * a01 + b01 * a11 + b02 * a21 + b03 * a31,
            b00 * a02 + b01 * a12 + b02 * a22 + b03 * a32,
            b00 * a03 + b01 * a13 + b02 * a23 + b03 * a33,
            b10 * a00 + b11 * a10 + b12 * a20 + b13 * a30,
            b10 * a01 + b11 * a11 + b12 * a21 + b13 * a31,
            b10 * a02 + b11 * a12 + b12 * a22 + b13 * a32,
            b10 * a03 + b11 * a13 + b12 * a23 + b13 * a33,
            b20 * a00 + b21 * a10 + b22 * a20 + b23 * a30,
            b20 * a01 + b21 * a11 + b22 * a21 + b23 * a31,
            b20 * a02 + b21 * a12 + b22 * a22 + b23 * a32,
            b20 * a03 + b21 * a13 + b22 * a23 + b23 * a33,
            b30 * a00 + b31 * a10 + b32 * a20 + b33 * a30,
            b30 * a01 + b31 * a11 + b32 * a21 + b33 * a31,
            b30 * a02 + b31 * a12 + b32 * a22 + b33 * a32,
            b30 * a03 + b31 * a13 + b32 * a23 + b33 * a33,
        ];

        self
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::new()
    }
}
