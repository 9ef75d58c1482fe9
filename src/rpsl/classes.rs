// RPSL object class definitions: key attributes, mandatory and optional attributes

/// How the value of a key attribute is validated and normalised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Ipv4Prefix,
    Ipv6Prefix,
    Ipv4Range,
    AsNumber,
    AsBlock,
    SetName,
    Handle,
}

#[derive(Debug)]
pub struct ObjectClass {
    pub name: &'static str,
    /// Key attributes in primary key order
    pub key: &'static [(&'static str, ValueKind)],
    /// Mandatory attributes besides the key
    pub mandatory: &'static [&'static str],
    pub optional: &'static [&'static str],
}

/// Attributes accepted on every object class
pub const COMMON_ATTRIBUTES: &[&str] = &[
    "descr",
    "remarks",
    "notify",
    "admin-c",
    "tech-c",
    "mnt-by",
    "changed",
    "created",
    "last-modified",
    "org",
    "source",
];

const SET_OPTIONAL: &[&str] = &["members", "mp-members", "mbrs-by-ref"];
const NUM_MANDATORY: &[&str] = &["netname", "country", "status", "mnt-by", "source"];
const NUM_OPTIONAL: &[&str] = &["mnt-lower", "mnt-routes", "mnt-irt", "geoloc", "language"];
const ROUTE_OPTIONAL: &[&str] = &[
    "holes",
    "member-of",
    "inject",
    "aggr-bndry",
    "aggr-mtd",
    "export-comps",
    "components",
    "mnt-lower",
    "mnt-routes",
    "geoidx",
    "roa-uri",
];

pub static OBJECT_CLASSES: &[ObjectClass] = &[
    ObjectClass {
        name: "as-block",
        key: &[("as-block", ValueKind::AsBlock)],
        mandatory: &["mnt-by", "source"],
        optional: &["mnt-lower"],
    },
    ObjectClass {
        name: "as-set",
        key: &[("as-set", ValueKind::SetName)],
        mandatory: &["mnt-by", "source"],
        optional: SET_OPTIONAL,
    },
    ObjectClass {
        name: "aut-num",
        key: &[("aut-num", ValueKind::AsNumber)],
        mandatory: &["as-name", "mnt-by", "source"],
        optional: &[
            "member-of", "import", "mp-import", "import-via", "export", "mp-export", "export-via",
            "default", "mp-default", "status", "mnt-lower", "mnt-routes",
        ],
    },
    ObjectClass {
        name: "domain",
        key: &[("domain", ValueKind::Handle)],
        mandatory: &["mnt-by", "source"],
        optional: &["zone-c", "nserver", "sub-dom", "dom-net", "refer", "ds-rdata"],
    },
    ObjectClass {
        name: "filter-set",
        key: &[("filter-set", ValueKind::SetName)],
        mandatory: &["mnt-by", "source"],
        optional: &["filter", "mp-filter"],
    },
    ObjectClass {
        name: "inet-rtr",
        key: &[("inet-rtr", ValueKind::Handle)],
        mandatory: &["local-as", "ifaddr", "mnt-by", "source"],
        optional: &["alias", "interface", "peer", "mp-peer", "member-of"],
    },
    ObjectClass {
        name: "inet6num",
        key: &[("inet6num", ValueKind::Ipv6Prefix)],
        mandatory: NUM_MANDATORY,
        optional: NUM_OPTIONAL,
    },
    ObjectClass {
        name: "inetnum",
        key: &[("inetnum", ValueKind::Ipv4Range)],
        mandatory: NUM_MANDATORY,
        optional: NUM_OPTIONAL,
    },
    ObjectClass {
        name: "key-cert",
        key: &[("key-cert", ValueKind::Handle)],
        mandatory: &["certif", "mnt-by", "source"],
        optional: &["method", "owner", "fingerpr"],
    },
    ObjectClass {
        name: "mntner",
        key: &[("mntner", ValueKind::Handle)],
        mandatory: &["upd-to", "auth", "mnt-by", "source"],
        optional: &["mnt-nfy"],
    },
    ObjectClass {
        name: "peering-set",
        key: &[("peering-set", ValueKind::SetName)],
        mandatory: &["mnt-by", "source"],
        optional: &["peering", "mp-peering"],
    },
    ObjectClass {
        name: "person",
        key: &[("nic-hdl", ValueKind::Handle)],
        mandatory: &["person", "address", "phone", "mnt-by", "source"],
        optional: &["fax-no", "e-mail"],
    },
    ObjectClass {
        name: "role",
        key: &[("nic-hdl", ValueKind::Handle)],
        mandatory: &["role", "address", "e-mail", "mnt-by", "source"],
        optional: &["phone", "fax-no", "trouble"],
    },
    ObjectClass {
        name: "route",
        key: &[("route", ValueKind::Ipv4Prefix), ("origin", ValueKind::AsNumber)],
        mandatory: &["mnt-by", "source"],
        optional: ROUTE_OPTIONAL,
    },
    ObjectClass {
        name: "route-set",
        key: &[("route-set", ValueKind::SetName)],
        mandatory: &["mnt-by", "source"],
        optional: SET_OPTIONAL,
    },
    ObjectClass {
        name: "route6",
        key: &[("route6", ValueKind::Ipv6Prefix), ("origin", ValueKind::AsNumber)],
        mandatory: &["mnt-by", "source"],
        optional: ROUTE_OPTIONAL,
    },
    ObjectClass {
        name: "rtr-set",
        key: &[("rtr-set", ValueKind::SetName)],
        mandatory: &["mnt-by", "source"],
        optional: SET_OPTIONAL,
    },
];

impl ObjectClass {
    /// Look up a class by its (lower-case) name
    pub fn find(name: &str) -> Option<&'static ObjectClass> {
        OBJECT_CLASSES.iter().find(|class| class.name == name)
    }

    pub fn is_key_attribute(&self, attribute: &str) -> bool {
        self.key.iter().any(|(name, _)| *name == attribute)
    }

    pub fn knows_attribute(&self, attribute: &str) -> bool {
        attribute == self.name
            || self.is_key_attribute(attribute)
            || self.mandatory.contains(&attribute)
            || self.optional.contains(&attribute)
            || COMMON_ATTRIBUTES.contains(&attribute)
    }
}
