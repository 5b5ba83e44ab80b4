//! Shader programs for OpenGL ES 2.0
//!
//! Representations bind to a program when they are created. The sources are
//! handed to whichever backend compiles them; nothing here talks to a GL
//! context.

/// Vertex shader for lit surface geometry
pub const SURFACE_VERTEX_SHADER: &str = r#"
uniform highp mat4 modelViewMatrix;
uniform highp mat4 projectionMatrix;
uniform mediump mat3 normalMatrix;
uniform lowp vec4 color;

attribute highp vec4 vertexPosition;
attribute mediump vec3 vertexNormal;

varying lowp vec4 varColor;

void main()
{
  mediump vec3 lightDirection = vec3(0.0, 0.0, 1.0);
  mediump vec3 normal = normalize(normalMatrix * vertexNormal);
  lowp float nDotL = max(dot(normal, lightDirection), 0.2);
  varColor = vec4(color.rgb * nDotL, color.a);
  gl_Position = projectionMatrix * modelViewMatrix * vertexPosition;
}
"#;

/// Fragment shader for lit surface geometry
pub const SURFACE_FRAGMENT_SHADER: &str = r#"
varying lowp vec4 varColor;

void main()
{
  gl_FragColor = varColor;
}
"#;

/// Vertex shader for textured slice planes
pub const TEXTURED_PLANE_VERTEX_SHADER: &str = r#"
uniform highp mat4 modelViewMatrix;
uniform highp mat4 projectionMatrix;

attribute highp vec4 vertexPosition;
attribute highp vec2 vertexTextureCoordinate;

varying highp vec2 varTextureCoordinate;

void main()
{
  varTextureCoordinate = vertexTextureCoordinate;
  gl_Position = projectionMatrix * modelViewMatrix * vertexPosition;
}
"#;

/// Fragment shader for textured slice planes
pub const TEXTURED_PLANE_FRAGMENT_SHADER: &str = r#"
uniform sampler2D image;

varying highp vec2 varTextureCoordinate;

void main()
{
  gl_FragColor = texture2D(image, varTextureCoordinate);
}
"#;

/// A vertex/fragment source pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgram {
    pub name: String,
    pub vertex_source: String,
    pub fragment_source: String,
}

impl ShaderProgram {
    pub fn new(
        name: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
        }
    }

    /// Program for contour and outline geometry
    pub fn surface() -> Self {
        Self::new("surface", SURFACE_VERTEX_SHADER, SURFACE_FRAGMENT_SHADER)
    }

    /// Program for textured image planes
    pub fn textured_plane() -> Self {
        Self::new("textured_plane", TEXTURED_PLANE_VERTEX_SHADER, TEXTURED_PLANE_FRAGMENT_SHADER)
    }

    /// Whether the program samples a texture
    pub fn is_textured(&self) -> bool {
        self.fragment_source.contains("sampler2D")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_programs() {
        assert!(ShaderProgram::textured_plane().is_textured());
        assert!(!ShaderProgram::surface().is_textured());
    }
}
