/// Display attribute resolved per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Label,
    Detail,
    Color,
    BackgroundColor,
    FilePattern,
    Hide,
    Icon,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Label,
        Attribute::Detail,
        Attribute::Color,
        Attribute::BackgroundColor,
        Attribute::FilePattern,
        Attribute::Hide,
        Attribute::Icon,
    ];

    /// Keys looked up under `options.statusbar`, in order.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Attribute::Label => &["label"],
            Attribute::Detail => &["detail", "tooltip"],
            Attribute::Color => &["color"],
            Attribute::BackgroundColor => &["backgroundColor"],
            Attribute::FilePattern => &["filePattern"],
            Attribute::Hide => &["hide"],
            Attribute::Icon => &["icon"],
        }
    }

    /// Whether the task object itself (or its runtime task) may supply the attribute.
    pub fn has_builtin(&self) -> bool {
        matches!(
            self,
            Attribute::Label | Attribute::Icon | Attribute::Detail | Attribute::Hide
        )
    }

    /// Whether the global default settings may supply the attribute.
    pub fn has_global_default(&self) -> bool {
        matches!(self, Attribute::Hide | Attribute::Color)
    }
}
