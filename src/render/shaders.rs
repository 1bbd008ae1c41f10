//! GLSL ES 3.00 programs. `evaluator.rs` holds the same maths in Rust.

/// Attribute locations shared by the programs and the pipeline
pub mod location {
    pub const POSITION: u32 = 0;
    pub const NORMAL: u32 = 1;
    pub const UV: u32 = 2;

    pub const CHAOS_POS: u32 = 0;
    pub const FALL_XZ: u32 = 1;
    pub const FALL_START_Y: u32 = 2;
    pub const SPEED: u32 = 3;
    pub const RANDOM: u32 = 4;
}

/// Vertex shader for the garland ribbon
pub const RIBBON_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec2 v_uv;
out vec3 v_normal;
out vec3 v_view_pos;

void main() {
    mat4 model_view = u_view * u_model;
    vec4 mv_pos = model_view * vec4(a_position, 1.0);

    v_uv = a_uv;
    v_normal = normalize(mat3(model_view) * a_normal);
    v_view_pos = -mv_pos.xyz;

    gl_Position = u_projection * mv_pos;
}
"#;

/// Fragment shader for the garland ribbon: stripes, silk sheen and reveal.
/// `v_uv.y` runs along the path, `v_uv.x` around the tube.
pub const RIBBON_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
in vec3 v_normal;
in vec3 v_view_pos;

uniform float u_time;
uniform float u_progress;

out vec4 fragColor;

float specular_term(vec3 n, vec3 v, float shininess) {
    vec3 l = normalize(vec3(0.3, 0.8, 0.6));
    vec3 h = normalize(l + v);
    float n_dot_l = max(dot(n, l), 0.0);
    float n_dot_h = max(dot(n, h), 0.0);
    return pow(n_dot_h, shininess) * n_dot_l;
}

void main() {
    float s = sin((v_uv.y * 6.0 + u_time * 0.4) * 3.1415);
    float k = smoothstep(-0.2, 0.2, s);
    vec3 base = mix(vec3(0.85, 0.18, 0.25), vec3(0.98, 0.85, 0.25), k);

    vec3 n = normalize(v_normal);
    vec3 v = normalize(v_view_pos);
    float spec = specular_term(n, v, 60.0);
    float fresnel = pow(1.0 - max(dot(n, v), 0.0), 3.0);
    vec3 color = base + vec3(spec * 0.25) + vec3(fresnel * 0.12);

    float reveal = smoothstep(0.0, 1.0, (v_uv.y - (1.0 - u_progress)) * 6.0);

    float alpha = 0.9 * reveal * clamp(u_progress * 1.2, 0.0, 1.0);
    alpha *= mix(0.7, 1.0, fresnel);
    alpha *= smoothstep(0.0, 0.15, v_uv.x) * smoothstep(1.0, 0.85, v_uv.x);

    fragColor = vec4(color, alpha);
}
"#;

/// Vertex shader for snow: blends scatter and fall positions by progress
pub const SNOW_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_chaos_pos;
layout(location = 1) in vec2 a_fall_xz;
layout(location = 2) in float a_fall_start_y;
layout(location = 3) in float a_speed;
layout(location = 4) in float a_random;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;
uniform float u_progress;

out float v_alpha;

void main() {
    float rate = a_speed * 0.3 + 0.2;
    float t = fract(u_time * rate + a_random * 10.0);
    float y_fall = a_fall_start_y - t * 16.0;

    float sway_x = sin(u_time * (0.3 + a_random)) * 0.2 * (1.0 - t);
    float sway_z = cos(u_time * (0.25 + a_random)) * 0.2 * (1.0 - t);
    vec3 fall_pos = vec3(a_fall_xz.x + sway_x, y_fall, a_fall_xz.y + sway_z);

    vec3 pos = mix(a_chaos_pos, fall_pos, u_progress);
    pos += vec3(sin(a_random * 10.0 + u_time) * 0.02);

    vec4 mv_pos = u_view * vec4(pos, 1.0);
    gl_Position = u_projection * mv_pos;
    gl_PointSize = mv_pos.z < 0.0
        ? (1.5 + a_random * 1.5) * (120.0 / -mv_pos.z)
        : 0.0;

    v_alpha = 0.6 - a_random * 0.4;
}
"#;

/// Fragment shader for snow: soft glow disk
pub const SNOW_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_alpha;

out vec4 fragColor;

void main() {
    float r = distance(gl_PointCoord, vec2(0.5));
    if (r > 0.5) {
        discard;
    }
    float glow = pow(1.0 - r * 2.0, 1.6);
    fragColor = vec4(vec3(1.0), v_alpha * glow);
}
"#;
