// Injected content filtering for the embedded site.
//
// Both scripts run at document start in every frame. The selectors and body
// class names in the cosmetic script are pinned to the target site's current
// markup; when the site changes its layout they must be updated here.

/// Substrings of request URLs that never reach the network.
pub const BLOCKED_URL_PATTERNS: &[&str] = &[
    "clarity.ms",
    "franeski.net",
    "adsbygoogle",
    "doubleclick.net",
];

/// Rust-side mirror of the in-page denylist, used by the webview navigation
/// handler to refuse top-level loads of ad/tracking hosts.
pub fn is_blocked_request(url: &str) -> bool {
    BLOCKED_URL_PATTERNS.iter().any(|p| url.contains(p))
}

fn denylist_regex() -> String {
    BLOCKED_URL_PATTERNS
        .iter()
        .map(|p| p.replace('.', "\\."))
        .collect::<Vec<_>>()
        .join("|")
}

/// Wraps `fetch` and `XMLHttpRequest.open` so denylisted requests are
/// short-circuited before they are sent. A blocked fetch resolves with an
/// empty 204 response; a blocked XHR is aborted. Everything else passes
/// through to the original primitives.
pub fn network_blocker_script() -> String {
    format!(
        r#"
(function () {{
    var deny = /{deny}/;
    var realFetch = window.fetch;
    window.fetch = function (input, init) {{
        var target = typeof input === 'string' ? input : input.url;
        if (deny.test(target)) {{
            return Promise.resolve(new Response('', {{ status: 204 }}));
        }}
        return realFetch.apply(this, arguments);
    }};
    var realOpen = XMLHttpRequest.prototype.open;
    XMLHttpRequest.prototype.open = function (method, target) {{
        if (deny.test(target)) {{
            this.abort();
            return;
        }}
        return realOpen.apply(this, arguments);
    }};
}})();
"#,
        deny = denylist_regex()
    )
}

/// Hides banner/footer/app-download chrome, normalizes page margins, and
/// keeps the page tidy across DOM churn via a persistent MutationObserver.
/// The document stays hidden until it is interactive, with a 5 second
/// fallback so a page that never settles is still shown.
pub fn cosmetic_script() -> &'static str {
    r#"
(function () {
    var css = [
        '#top,.b-top-banner,.b-side-banner,.b-footer,.b-bottom-banner{display:none!important;}',
        '.b-dwnapp{display:none!important;}',
        'html,body,#wrapper,#main{margin:0!important;padding:0!important;width:100%!important;}',
        'body[style*="padding-top"],body.has-brand.active-brand.pp.fixed-header.no-touch{padding-top:0!important;margin-top:0!important;}',
        'body.has-brand.active-brand.pp.fixed-header.no-touch::before{content:none!important;display:none!important;}'
    ].join('');
    var style = document.createElement('style');
    style.textContent = css;
    document.documentElement.prepend(style);

    document.documentElement.style.visibility = 'hidden';
    var reveal = function () {
        document.documentElement.style.visibility = 'visible';
    };
    if (document.readyState === 'complete' || document.readyState === 'interactive') {
        reveal();
    } else {
        document.addEventListener('DOMContentLoaded', reveal, { once: true });
    }
    setTimeout(reveal, 5000);

    var tidy = function () {
        if (!document.body) { return; }
        document.body.style.paddingTop = '0';
        document.body.style.marginTop = '0';
        document.body.classList.remove('has-brand');
        var first = document.body.firstElementChild;
        if (first && first.tagName === 'DIV' && first.offsetHeight > 50 && first.children.length === 0) {
            first.remove();
        }
        document.querySelectorAll('.b-dwnapp').forEach(function (el) { el.remove(); });
    };
    var start = function () {
        tidy();
        new MutationObserver(tidy).observe(document.body, { childList: true, attributes: true });
    };
    if (document.body) {
        start();
    } else {
        document.addEventListener('DOMContentLoaded', start, { once: true });
    }
})();
"#
}
