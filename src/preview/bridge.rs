/// Stub of the host ad-SDK bridge (`mraid`) injected into previewed
/// endcards. Creatives built for an ad web view call this object as soon
/// as they run; outside a real ad host the first call throws and the
/// creative never paints.
///
/// The stub fires `ready` asynchronously after the document load event,
/// exactly once. Listeners registered after that point can fall back to
/// `getState()`, which reports `default` from then on.
pub const AD_SDK_BRIDGE_JS: &str = r#"(function () {
    if (window.mraid) {
        return;
    }

    var state = 'loading';
    var listeners = {};
    var customClose = false;

    window.mraid = {
        getState: function () { return state; },
        addEventListener: function (event, listener) {
            (listeners[event] = listeners[event] || []).push(listener);
        },
        removeEventListener: function (event, listener) {
            var queue = listeners[event] || [];
            var idx = queue.indexOf(listener);
            if (idx !== -1) { queue.splice(idx, 1); }
        },
        useCustomClose: function (value) { customClose = !!value; },
        isViewable: function () { return state === 'default'; },
        getMaxSize: function () {
            return { width: window.innerWidth, height: window.innerHeight };
        },
        getScreenSize: function () {
            return { width: window.screen.width, height: window.screen.height };
        },
        open: function (url) { window.open(url, '_blank'); },
        close: function () { state = 'hidden'; },
        expand: function () { state = 'expanded'; }
    };

    window.addEventListener('load', function () {
        setTimeout(function () {
            state = 'default';
            var queue = listeners['ready'] || [];
            delete listeners['ready'];
            for (var i = 0; i < queue.length; i++) {
                queue[i]();
            }
        }, 0);
    });
})();
"#;

/// Injects the bridge stub into a payload document so it runs before any
/// creative script: right after `<head>`, else after `<html>`, else
/// prepended to the document.
pub fn inject_bridge(html: &str) -> String {
    let script = format!("<script>{}</script>", AD_SDK_BRIDGE_JS);

    for tag in ["head", "html"] {
        if let Some(pos) = tag_end(html, tag) {
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..pos]);
            out.push_str(&script);
            out.push_str(&html[pos..]);
            return out;
        }
    }

    format!("{}{}", script, html)
}

/// Byte offset just past the closing `>` of the first `<name ...>` tag,
/// case-insensitive. `<head` must be followed by whitespace or `>` so
/// `<header>` does not match.
fn tag_end(html: &str, name: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let needle = format!("<{}", name);
    let mut from = 0;

    while let Some(rel) = lower[from..].find(&needle) {
        let start = from + rel;
        let after = start + needle.len();
        let at_boundary = lower[after..]
            .chars()
            .next()
            .map_or(false, |c| c == '>' || c.is_ascii_whitespace());
        if at_boundary {
            let close = lower[start..].find('>')?;
            return Some(start + close + 1);
        }
        from = after;
    }

    None
}
