use crate::extract::rules::NODE_MARKER_ATTR;

/// Builds the script injected into the hidden tab.
///
/// The script marks every element with [`NODE_MARKER_ATTR`], records the
/// rendered geometry of each one, and returns the serialized document
/// together with any background images declared in readable stylesheets.
/// Its return value decodes into a `PageSnapshot`.
#[derive(Debug, Clone)]
pub struct LayoutProbe {
    collect_stylesheets: bool,
}

impl LayoutProbe {
    pub fn new(collect_stylesheets: bool) -> Self {
        Self {
            collect_stylesheets,
        }
    }

    pub fn script(&self) -> String {
        let marker = NODE_MARKER_ATTR;
        let collect_stylesheets = self.collect_stylesheets;

        format!(
            r#"
            (() => {{
                const marker = '{marker}';
                const layout = [];
                const sides = ['Top', 'Right', 'Bottom', 'Left'];

                document.querySelectorAll('*').forEach((el, index) => {{
                    el.setAttribute(marker, String(index));
                    const rect = el.getBoundingClientRect();
                    const style = window.getComputedStyle(el);
                    const hasBorder = sides.some(side =>
                        parseFloat(style['border' + side + 'Width']) > 0 &&
                        !['none', 'hidden'].includes(style['border' + side + 'Style'])
                    );
                    layout.push({{
                        node: index,
                        rect: {{
                            top: rect.top, left: rect.left,
                            bottom: rect.bottom, right: rect.right,
                            width: rect.width, height: rect.height
                        }},
                        offsetWidth: el.offsetWidth || 0,
                        offsetHeight: el.offsetHeight || 0,
                        clientRects: el.getClientRects().length,
                        backgroundColor: style.backgroundColor || '',
                        hasBorder: hasBorder
                    }});
                }});

                const stylesheets = [];
                if ({collect_stylesheets}) {{
                    for (const sheet of Array.from(document.styleSheets)) {{
                        let rules;
                        try {{
                            rules = sheet.cssRules;
                        }} catch (e) {{
                            // cross-origin sheets are unreadable
                            continue;
                        }}
                        if (!rules) continue;
                        const urls = [];
                        for (const rule of Array.from(rules)) {{
                            const decl = rule.style;
                            if (!decl) continue;
                            const value = decl.backgroundImage || decl.background || '';
                            const pattern = /url\(\s*['"]?([^'")]+)['"]?\s*\)/g;
                            let match;
                            while ((match = pattern.exec(value)) !== null) {{
                                urls.push(match[1]);
                            }}
                        }}
                        if (urls.length > 0) {{
                            stylesheets.push({{ href: sheet.href, urls: urls }});
                        }}
                    }}
                }}

                return {{
                    html: document.documentElement.outerHTML,
                    url: window.location.href,
                    baseUri: document.baseURI,
                    viewportHeight: window.innerHeight,
                    documentHeight: document.documentElement.scrollHeight,
                    layout: layout,
                    stylesheets: stylesheets
                }};
            }})()
            "#
        )
    }
}
