use serde::{Deserialize, Serialize};

/// Element class on the drawing surface. Each role is replaced as a whole on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Link,
    Node,
    Label,
    Legend,
}

impl Role {
    /// Application order; later roles paint over earlier ones.
    pub const ALL: [Role; 4] = [Role::Link, Role::Node, Role::Label, Role::Legend];

    pub fn class_name(self) -> &'static str {
        match self {
            Role::Link => "link",
            Role::Node => "node",
            Role::Label => "label",
            Role::Legend => "legend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    None,
    Transparent,
    Color(String),
}

impl Paint {
    pub fn as_css(&self) -> &str {
        match self {
            Paint::None => "none",
            Paint::Transparent => "transparent",
            Paint::Color(c) => c.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub d: String,
    pub fill: Paint,
    pub stroke: String,
    pub stroke_width: f64,
    pub dash: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Paint,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub x: f64,
    pub y: f64,
    /// Baseline shift in em; `None` leaves the baseline untouched.
    pub dy_em: Option<f64>,
    pub anchor: Option<TextAnchor>,
    pub font_size: Option<f64>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Paint,
}

/// A nested viewport translated from the surface origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPrimitive {
    pub translate: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub children: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Path(PathPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
    Rect(RectPrimitive),
    Group(GroupPrimitive),
}

/// Everything one render pass draws, grouped by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub links: Vec<Primitive>,
    pub nodes: Vec<Primitive>,
    pub labels: Vec<Primitive>,
    pub legend: Vec<Primitive>,
    /// Size needed to show the whole tree: surface width by the larger of surface height and the
    /// breadth span.
    pub extent: (f64, f64),
}

impl Scene {
    pub fn role(&self, role: Role) -> &[Primitive] {
        match role {
            Role::Link => &self.links,
            Role::Node => &self.nodes,
            Role::Label => &self.labels,
            Role::Legend => &self.legend,
        }
    }

    pub fn len(&self) -> usize {
        Role::ALL.iter().map(|&r| self.role(r).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
