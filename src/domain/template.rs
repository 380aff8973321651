//! Notification templates.
//!
//! A template body is text interleaved with bracketed placeholders. Only the
//! closed set in [`Placeholder`] is substituted; any other bracketed text is
//! kept verbatim.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    UserName,
    OrderCode,
}

impl Placeholder {
    const ALL: [Placeholder; 2] = [Placeholder::UserName, Placeholder::OrderCode];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::UserName => "[Nama Pengguna]",
            Placeholder::OrderCode => "[Order Code]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub user_name: &'a str,
    pub order_code: Option<&'a str>,
}

impl Template {
    pub fn parse(body: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = body;

        while !rest.is_empty() {
            let found = Placeholder::ALL
                .iter()
                .find(|p| rest.starts_with(p.token()))
                .copied();

            match found {
                Some(placeholder) => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                    rest = &rest[placeholder.token().len()..];
                }
                None => {
                    let mut chars = rest.chars();
                    if let Some(c) = chars.next() {
                        text.push(c);
                    }
                    rest = chars.as_str();
                }
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(Placeholder::UserName) => out.push_str(ctx.user_name),
                Segment::Placeholder(Placeholder::OrderCode) => {
                    out.push_str(ctx.order_code.unwrap_or_default())
                }
            }
        }
        out
    }
}
