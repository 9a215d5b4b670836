//! The resource handle service declared in the generated preamble.
//!
//! Native resources (textures, sounds, ...) never cross into the generic
//! layer as pointers. Custom bodies store them in a per-kind handle table
//! and hand out integer ids instead. All tables live in one service object,
//! `rlreg::Resources`, reached only through `rlreg::resources()`.

/// One kind of native resource with its own handle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Texture,
    Sound,
    Music,
    AudioStream,
    Model,
    Mesh,
    Material,
    Shader,
    Font,
    Wave,
    Image,
    Cubemap,
    RenderTexture,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 13] = [
        ResourceKind::Texture,
        ResourceKind::Sound,
        ResourceKind::Music,
        ResourceKind::AudioStream,
        ResourceKind::Model,
        ResourceKind::Mesh,
        ResourceKind::Material,
        ResourceKind::Shader,
        ResourceKind::Font,
        ResourceKind::Wave,
        ResourceKind::Image,
        ResourceKind::Cubemap,
        ResourceKind::RenderTexture,
    ];

    /// Member name of the table inside `Resources`.
    pub fn table(self) -> &'static str {
        match self {
            ResourceKind::Texture => "textures",
            ResourceKind::Sound => "sounds",
            ResourceKind::Music => "music",
            ResourceKind::AudioStream => "audio_streams",
            ResourceKind::Model => "models",
            ResourceKind::Mesh => "meshes",
            ResourceKind::Material => "materials",
            ResourceKind::Shader => "shaders",
            ResourceKind::Font => "fonts",
            ResourceKind::Wave => "waves",
            ResourceKind::Image => "images",
            ResourceKind::Cubemap => "cubemaps",
            ResourceKind::RenderTexture => "render_textures",
        }
    }

    /// Native type stored in the table.
    pub fn native_type(self) -> &'static str {
        match self {
            ResourceKind::Texture => "::Texture2D",
            ResourceKind::Sound => "::Sound",
            ResourceKind::Music => "::Music",
            ResourceKind::AudioStream => "::AudioStream",
            ResourceKind::Model => "::Model",
            ResourceKind::Mesh => "::Mesh",
            ResourceKind::Material => "::Material",
            ResourceKind::Shader => "::Shader",
            ResourceKind::Font => "::Font",
            ResourceKind::Wave => "::Wave",
            ResourceKind::Image => "::Image",
            ResourceKind::Cubemap => "::TextureCubemap",
            ResourceKind::RenderTexture => "::RenderTexture2D",
        }
    }
}

const HANDLE_TABLE: &str = r#"    // Raised by generated bindings called with the wrong number of arguments.
    class ArityError : public std::runtime_error {
    public:
        using std::runtime_error::runtime_error;
    };

    // Integer-keyed table with its own monotonic id counter. Ids start at 1.
    template <typename T>
    class HandleTable {
    public:
        int insert(const T& item) {
            int id = next_id_++;
            items_.emplace(id, item);
            return id;
        }
        T* find(int id) {
            auto it = items_.find(id);
            return it == items_.end() ? nullptr : &it->second;
        }
        bool erase(int id) { return items_.erase(id) > 0; }
        std::size_t size() const { return items_.size(); }
        void clear() { items_.clear(); }

    private:
        int next_id_ = 1;
        std::unordered_map<int, T> items_;
    };
"#;

/// C++ declarations for the handle service, inside `namespace rlreg`.
pub fn render_service(kinds: &[ResourceKind]) -> String {
    let mut out = String::from(HANDLE_TABLE);
    out.push('\n');
    out.push_str("    // Owns every handle table; constructed once, destroyed at exit.\n");
    out.push_str("    class Resources {\n");
    out.push_str("    public:\n");
    for kind in kinds {
        out.push_str(&format!(
            "        HandleTable<{}> {};\n",
            kind.native_type(),
            kind.table()
        ));
    }
    out.push('\n');
    out.push_str("        static Resources& instance() {\n");
    out.push_str("            static Resources service;\n");
    out.push_str("            return service;\n");
    out.push_str("        }\n\n");
    out.push_str("        Resources(const Resources&) = delete;\n");
    out.push_str("        Resources& operator=(const Resources&) = delete;\n\n");
    out.push_str("    private:\n");
    out.push_str("        Resources() = default;\n");
    out.push_str("    };\n\n");
    out.push_str("    inline Resources& resources() { return Resources::instance(); }\n");
    out
}
